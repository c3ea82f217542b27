use glam::Vec3;
use hexworld_kernel::SliderBinding;
use hexworld_scene::{Scene, SceneError};
use tracing::trace;

/// Position sliders shown in the debug UI, one per binding.
///
/// Bindings whose object does not exist yet are skipped rather than
/// indexing past the end of the object list.
#[derive(Debug, Clone, Default)]
pub struct ObjectSliders {
    bindings: Vec<SliderBinding>,
}

impl ObjectSliders {
    pub fn new(bindings: Vec<SliderBinding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[SliderBinding] {
        &self.bindings
    }

    /// The live position a binding edits.
    pub fn resolve<'a>(
        scene: &'a mut Scene,
        binding: &SliderBinding,
    ) -> Result<&'a mut Vec3, SceneError> {
        Ok(&mut scene.object_mut(binding.object)?.transform.position)
    }

    /// Call `edit` for every binding that resolves, in order. Returns how many
    /// were shown.
    pub fn for_each_live<F>(&self, scene: &mut Scene, mut edit: F) -> usize
    where
        F: FnMut(&SliderBinding, &mut Vec3),
    {
        let mut shown = 0;
        for binding in &self.bindings {
            match Self::resolve(scene, binding) {
                Ok(position) => {
                    edit(binding, position);
                    shown += 1;
                }
                Err(err) => trace!(label = %binding.label, %err, "slider hidden"),
            }
        }
        shown
    }
}
