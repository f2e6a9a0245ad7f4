//! Linux blur module - drives the native translucency effect.

use async_trait::async_trait;
use std::sync::{LazyLock, Mutex};
use tracing::{debug, warn};

use vitrine_core::{CssValue, EffectField, HostWindow, Platform, PlatformSelector};

use crate::module::{Module, ModuleDescriptor, ModuleId};

/// Property toggling the blur effect on or off.
pub const PROP_BLUR: &str = "--vitrine-linux-blur";
/// Property tuning the compositor's gaussian sigma.
pub const PROP_SIGMA: &str = "--vitrine-blur-sigma";
/// Property tuning the corner radius of the blurred region.
pub const PROP_CORNER_RADIUS: &str = "--vitrine-corner-radius";

static DESCRIPTOR: LazyLock<ModuleDescriptor> = LazyLock::new(|| ModuleDescriptor {
    id: ModuleId::new("linux-blur"),
    core: true,
    default_on: true,
    platforms: PlatformSelector::only(Platform::Linux),
    css_props: vec![
        PROP_BLUR.to_string(),
        PROP_SIGMA.to_string(),
        PROP_CORNER_RADIUS.to_string(),
    ],
});

/// Core module translating the observed blur properties into calls on each
/// window's native effect driver.
///
/// The last applied blur toggle is remembered so a window created after a
/// refresh cycle starts out consistent with its siblings.
#[derive(Debug, Default)]
pub struct LinuxBlurModule {
    last_blur: Mutex<Option<bool>>,
}

impl LinuxBlurModule {
    /// Create the module.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The module's static descriptor.
    #[must_use]
    pub fn descriptor_static() -> &'static ModuleDescriptor {
        &DESCRIPTOR
    }

    async fn forward_field(window: &dyn HostWindow, field: EffectField, value: Option<CssValue>) {
        // Validate before the driver sees anything: a theme typo must not
        // corrupt driver state.
        let Some(number) = value.as_ref().and_then(CssValue::as_int) else {
            if let Some(raw) = value {
                debug!(%field, value = %raw, "Ignoring non-numeric tuning value");
            }
            return;
        };

        let driver = window.effects();
        if !driver.supports(field) {
            return;
        }

        if let Err(e) = driver.set_field(field, number).await {
            warn!(window = %window.id(), %field, error = %e, "Effect driver rejected field");
        }
    }
}

#[async_trait]
impl Module for LinuxBlurModule {
    fn descriptor(&self) -> &ModuleDescriptor {
        &DESCRIPTOR
    }

    async fn update(&self, window: &dyn HostWindow, property: &str, value: Option<CssValue>) {
        match property {
            PROP_BLUR => {
                let enabled = value.as_ref().is_some_and(CssValue::as_bool);
                *self
                    .last_blur
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(enabled);
                if let Err(e) = window.effects().set_blur(enabled).await {
                    warn!(window = %window.id(), error = %e, "Effect driver failed to toggle blur");
                }
            }
            PROP_SIGMA => Self::forward_field(window, EffectField::BlurSigma, value).await,
            PROP_CORNER_RADIUS => {
                Self::forward_field(window, EffectField::CornerRadius, value).await;
            }
            _ => {}
        }
    }

    async fn window_init(&self, window: &dyn HostWindow) {
        // Re-assert the last applied toggle so a fresh window matches the
        // windows that already went through a refresh cycle.
        let last = *self
            .last_blur
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let Some(enabled) = last else {
            debug!(window = %window.id(), "Blur module saw new window, no state to re-assert");
            return;
        };

        debug!(window = %window.id(), enabled, "Re-asserting blur on new window");
        if let Err(e) = window.effects().set_blur(enabled).await {
            warn!(window = %window.id(), error = %e, "Effect driver failed to re-assert blur");
        }
    }

    async fn window_close(&self, window: &dyn HostWindow) {
        debug!(window = %window.id(), "Blur module saw window close");
    }

    async fn unload(&self) {
        debug!("Blur module unloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use vitrine_core::{
        EffectDriver, HostError, HostResult, RemoteRequest, RendererContext, WindowId,
    };

    #[derive(Debug, Default)]
    struct RecordingDriver {
        blur: Mutex<Option<bool>>,
        fields: Mutex<Vec<(EffectField, i64)>>,
        supports_sigma: bool,
    }

    #[async_trait]
    impl EffectDriver for RecordingDriver {
        async fn set_blur(&self, enabled: bool) -> HostResult<()> {
            *self.blur.lock().unwrap() = Some(enabled);
            Ok(())
        }

        fn supports(&self, field: EffectField) -> bool {
            match field {
                EffectField::BlurSigma => self.supports_sigma,
                EffectField::CornerRadius => false,
            }
        }

        async fn set_field(&self, field: EffectField, value: i64) -> HostResult<()> {
            self.fields.lock().unwrap().push((field, value));
            Ok(())
        }
    }

    struct NullRenderer;

    #[async_trait]
    impl RendererContext for NullRenderer {
        async fn execute(&self, _request: RemoteRequest) -> HostResult<serde_json::Value> {
            Err(HostError::ContextGone)
        }
    }

    struct FakeWindow {
        driver: Arc<RecordingDriver>,
    }

    impl HostWindow for FakeWindow {
        fn id(&self) -> WindowId {
            WindowId(1)
        }

        fn renderer(&self) -> Arc<dyn RendererContext> {
            Arc::new(NullRenderer)
        }

        fn effects(&self) -> Arc<dyn EffectDriver> {
            Arc::clone(&self.driver) as Arc<dyn EffectDriver>
        }
    }

    fn window_with(driver: RecordingDriver) -> (FakeWindow, Arc<RecordingDriver>) {
        let driver = Arc::new(driver);
        (
            FakeWindow {
                driver: Arc::clone(&driver),
            },
            driver,
        )
    }

    #[tokio::test]
    async fn test_blur_toggle_truthiness() {
        let module = LinuxBlurModule::new();

        for (raw, expected) in [("true", true), ("TRUE", true), ("True", true), ("no", false)] {
            let (window, driver) = window_with(RecordingDriver::default());
            module
                .update(&window, PROP_BLUR, Some(CssValue::new(raw)))
                .await;
            assert_eq!(*driver.blur.lock().unwrap(), Some(expected), "value {raw:?}");
        }
    }

    #[tokio::test]
    async fn test_absent_blur_value_disables() {
        let module = LinuxBlurModule::new();
        let (window, driver) = window_with(RecordingDriver::default());

        module.update(&window, PROP_BLUR, None).await;
        assert_eq!(*driver.blur.lock().unwrap(), Some(false));
    }

    #[tokio::test]
    async fn test_sigma_forwarded_when_supported() {
        let module = LinuxBlurModule::new();
        let (window, driver) = window_with(RecordingDriver {
            supports_sigma: true,
            ..RecordingDriver::default()
        });

        module
            .update(&window, PROP_SIGMA, Some(CssValue::new("12")))
            .await;
        assert_eq!(
            driver.fields.lock().unwrap().as_slice(),
            &[(EffectField::BlurSigma, 12)]
        );
    }

    #[tokio::test]
    async fn test_invalid_sigma_never_reaches_driver() {
        let module = LinuxBlurModule::new();
        let (window, driver) = window_with(RecordingDriver {
            supports_sigma: true,
            ..RecordingDriver::default()
        });

        module
            .update(&window, PROP_SIGMA, Some(CssValue::new("abc")))
            .await;
        assert!(driver.fields.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_window_init_reasserts_last_blur_state() {
        let module = LinuxBlurModule::new();

        // No refresh yet: nothing to re-assert.
        let (window, driver) = window_with(RecordingDriver::default());
        module.window_init(&window).await;
        assert_eq!(*driver.blur.lock().unwrap(), None);

        // After a refresh turned blur on, a fresh window gets the same state.
        let (seen_window, _) = window_with(RecordingDriver::default());
        module
            .update(&seen_window, PROP_BLUR, Some(CssValue::new("true")))
            .await;

        let (new_window, new_driver) = window_with(RecordingDriver::default());
        module.window_init(&new_window).await;
        assert_eq!(*new_driver.blur.lock().unwrap(), Some(true));
    }

    #[tokio::test]
    async fn test_unsupported_field_is_noop() {
        let module = LinuxBlurModule::new();
        let (window, driver) = window_with(RecordingDriver::default());

        module
            .update(&window, PROP_CORNER_RADIUS, Some(CssValue::new("8")))
            .await;
        assert!(driver.fields.lock().unwrap().is_empty());
    }
}
