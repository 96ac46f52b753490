use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    assets::LoaderRef,
    error::AssetError,
    gfx::{resources::environment::EnvironmentPrefilter, scene::Scene},
};

/// Loads an HDR panorama and installs it as the scene's ambient environment
///
/// The raw panorama and the prefilter are released only after the filtered
/// map is stored on the scene.
pub async fn load_environment(
    scene: Rc<RefCell<Scene>>,
    loader: LoaderRef,
    mut prefilter: Box<dyn EnvironmentPrefilter>,
    url: String,
    intensity: f32,
) -> Result<(), AssetError> {
    let hdr = loader.load_hdr(&url).await?;
    let map = prefilter.from_equirectangular(&hdr);
    let levels = map.levels.len();

    {
        let mut scene = scene.borrow_mut();
        scene.environment = Some(Rc::new(map));
        scene.environment_intensity = intensity;
    }

    hdr.dispose();
    prefilter.dispose();
    log::info!("environment '{}' applied ({} levels)", url, levels);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::testing::MockLoader;
    use crate::gfx::resources::environment::{EnvironmentMap, HdrImage, MipChainPrefilter};
    use futures::executor::block_on;

    struct RecordingPrefilter {
        scene: Rc<RefCell<Scene>>,
        inner: MipChainPrefilter,
        assigned_at_dispose: Rc<RefCell<Option<bool>>>,
    }

    impl EnvironmentPrefilter for RecordingPrefilter {
        fn from_equirectangular(&mut self, hdr: &HdrImage) -> EnvironmentMap {
            assert!(self.scene.borrow().environment.is_none());
            self.inner.from_equirectangular(hdr)
        }

        fn dispose(self: Box<Self>) {
            *self.assigned_at_dispose.borrow_mut() = Some(self.scene.borrow().environment.is_some());
        }
    }

    #[test]
    fn test_disposal_happens_after_assignment() {
        let scene = Rc::new(RefCell::new(Scene::new()));
        let record = Rc::new(RefCell::new(None));
        let prefilter = Box::new(RecordingPrefilter {
            scene: scene.clone(),
            inner: MipChainPrefilter::default(),
            assigned_at_dispose: record.clone(),
        });

        block_on(load_environment(
            scene.clone(),
            Rc::new(MockLoader::new()),
            prefilter,
            "assets/hdr/studio.hdr".into(),
            1.5,
        ))
        .unwrap();

        assert_eq!(*record.borrow(), Some(true));
        let scene = scene.borrow();
        assert_eq!(scene.environment_intensity, 1.5);
        assert_eq!(scene.environment.as_ref().unwrap().irradiance(), [2.0, 1.5, 1.0]);
    }

    #[test]
    fn test_failed_hdr_leaves_scene_untouched() {
        let scene = Rc::new(RefCell::new(Scene::new()));
        let loader = Rc::new(MockLoader::new());
        loader.fail("missing.hdr");

        let result = block_on(load_environment(
            scene.clone(),
            loader,
            Box::new(MipChainPrefilter::default()),
            "missing.hdr".into(),
            1.0,
        ));
        assert!(result.is_err());
        assert!(scene.borrow().environment.is_none());
        assert_eq!(scene.borrow().environment_intensity, 1.0);
    }
}
