use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use hexworld_render::RenderView;
use hexworld_scene::{
    MAX_POINT_LIGHTS, MaterialHandle, MeshData, MeshHandle, Scene, ShaderKind, VertexAttribute,
};
use std::collections::{BTreeMap, HashMap};
use std::ops::Range;
use tracing::debug;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct GpuPointLight {
    position_radius: [f32; 4],
    colour: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    sun_direction: [f32; 4],
    sun_colour: [f32; 4],
    light_count: [u32; 4],
    point_lights: [GpuPointLight; MAX_POINT_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    tint: [f32; 4],
}

/// Instances sharing one mesh and material, as a range of the instance buffer.
#[derive(Debug, Clone, PartialEq)]
struct Batch {
    mesh: MeshHandle,
    shader: ShaderKind,
    instances: Range<u32>,
}

fn extend(v: Vec3, w: f32) -> [f32; 4] {
    [v.x, v.y, v.z, w]
}

fn build_uniforms(scene: &Scene, view: &RenderView) -> Uniforms {
    let camera = scene.camera();
    let lights = scene.lights();
    let mut point_lights = [GpuPointLight::zeroed(); MAX_POINT_LIGHTS];
    for (slot, light) in point_lights.iter_mut().zip(lights.point_lights()) {
        *slot = GpuPointLight {
            position_radius: extend(light.position, light.radius),
            colour: extend(light.colour, 1.0),
        };
    }
    let (sun_direction, sun_colour) = lights
        .directional()
        .map_or((Vec3::NEG_Y, Vec3::ZERO), |d| (d.direction, d.colour));
    Uniforms {
        view_proj: view.view_projection(camera).to_cols_array_2d(),
        eye: extend(camera.eye, 1.0),
        sun_direction: extend(sun_direction, 0.0),
        sun_colour: extend(sun_colour, 1.0),
        light_count: [lights.point_lights().len().min(MAX_POINT_LIGHTS) as u32, 0, 0, 0],
        point_lights,
    }
}

/// Group objects by mesh and material; each group becomes one instanced draw.
fn build_batches(scene: &Scene) -> (Vec<InstanceData>, Vec<Batch>) {
    let mut groups: BTreeMap<(MeshHandle, MaterialHandle), Vec<InstanceData>> = BTreeMap::new();
    for object in scene.objects() {
        let tint = scene
            .resources()
            .material(object.material)
            .map_or(Vec3::ONE, |m| m.tint);
        let cols = object.transform.matrix().to_cols_array_2d();
        groups
            .entry((object.mesh, object.material))
            .or_default()
            .push(InstanceData {
                model_0: cols[0],
                model_1: cols[1],
                model_2: cols[2],
                model_3: cols[3],
                tint: extend(tint, 1.0),
            });
    }

    let mut instances = Vec::with_capacity(scene.object_count());
    let mut batches = Vec::with_capacity(groups.len());
    for ((mesh, material), group) in groups {
        let shader = scene
            .resources()
            .material(material)
            .map_or(ShaderKind::default(), |m| m.shader);
        let start = instances.len() as u32;
        instances.extend(group);
        batches.push(Batch {
            mesh,
            shader,
            instances: start..instances.len() as u32,
        });
    }
    (instances, batches)
}

/// One vertex buffer per attribute, bound at the attribute's slot.
struct GpuMesh {
    attributes: Vec<(u32, wgpu::Buffer)>,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, mesh: &MeshData) -> Self {
        let attributes = VertexAttribute::ALL
            .iter()
            .map(|&attribute| {
                let data: Vec<[f32; 3]> =
                    mesh.attribute(attribute).iter().map(|v| v.to_array()).collect();
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{}_{attribute}_buffer", mesh.label())),
                    contents: bytemuck::cast_slice(&data),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                (attribute.slot(), buffer)
            })
            .collect();
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{}_index_buffer", mesh.label())),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });
        debug!(
            mesh = mesh.label(),
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "uploaded mesh"
        );
        Self {
            attributes,
            index_buffer,
            index_count: mesh.indices().len() as u32,
        }
    }
}

const INSTANCE_SLOT: u32 = 3;

fn per_vertex(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes,
    }
}

fn vec3_layout(location: u32) -> [wgpu::VertexAttribute; 1] {
    [wgpu::VertexAttribute {
        format: wgpu::VertexFormat::Float32x3,
        offset: 0,
        shader_location: location,
    }]
}

/// wgpu-based scene renderer.
pub struct WgpuRenderer {
    pipelines: HashMap<ShaderKind, wgpu::RenderPipeline>,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    meshes: HashMap<MeshHandle, GpuMesh>,
    instance_buffer: wgpu::Buffer,
    instance_capacity: u32,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipelines = [ShaderKind::BaseColour]
            .into_iter()
            .map(|kind| {
                let pipeline = Self::create_pipeline(device, &pipeline_layout, surface_format, kind);
                (kind, pipeline)
            })
            .collect();

        let instance_capacity = 1024;
        let instance_buffer = Self::create_instance_buffer(device, instance_capacity);
        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            pipelines,
            uniform_buffer,
            uniform_bind_group,
            meshes: HashMap::new(),
            instance_buffer,
            instance_capacity,
            depth_texture,
            surface_format,
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        surface_format: wgpu::TextureFormat,
        kind: ShaderKind,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{kind:?}_shader")),
            source: wgpu::ShaderSource::Wgsl(shaders::source(kind).into()),
        });

        let position = vec3_layout(0);
        let colour = vec3_layout(1);
        let normal = vec3_layout(2);
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{kind:?}_pipeline")),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[
                    per_vertex(&position),
                    per_vertex(&colour),
                    per_vertex(&normal),
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstanceData>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            3 => Float32x4,
                            4 => Float32x4,
                            5 => Float32x4,
                            6 => Float32x4,
                            7 => Float32x4
                        ],
                    },
                ],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            multiview: None,
            cache: None,
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame of the scene.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        scene: &Scene,
        view: &RenderView,
    ) {
        for (handle, mesh) in scene.resources().meshes() {
            self.meshes
                .entry(handle)
                .or_insert_with(|| GpuMesh::upload(device, mesh));
        }

        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&build_uniforms(scene, view)),
        );

        let (instances, batches) = build_batches(scene);
        if instances.len() as u32 > self.instance_capacity {
            self.instance_capacity = (instances.len() as u32).next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.instance_capacity);
            debug!(capacity = self.instance_capacity, "grew instance buffer");
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.1,
                            b: 0.15,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(INSTANCE_SLOT, self.instance_buffer.slice(..));
            for batch in &batches {
                let (Some(pipeline), Some(mesh)) =
                    (self.pipelines.get(&batch.shader), self.meshes.get(&batch.mesh))
                else {
                    continue;
                };
                pass.set_pipeline(pipeline);
                for (slot, buffer) in &mesh.attributes {
                    pass.set_vertex_buffer(*slot, buffer.slice(..));
                }
                pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                pass.draw_indexed(0..mesh.index_count, 0, batch.instances.clone());
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_instance_buffer(device: &wgpu::Device, capacity: u32) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: u64::from(capacity) * std::mem::size_of::<InstanceData>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use hexworld_common::Transform;
    use hexworld_scene::{LightingSetup, Material, geometry};

    fn two_mesh_scene() -> Scene {
        let mut scene = Scene::new();
        let plane = scene
            .resources_mut()
            .add_mesh(geometry::ground_plane().unwrap());
        let prism = scene
            .resources_mut()
            .add_mesh(geometry::hex_prism(0.5, 1.0, geometry::PRISM_COLOUR).unwrap());
        let material = scene
            .resources_mut()
            .add_material(Material::base_colour("base"));
        scene
            .add_object(prism, material, Transform::new(Vec3::X, 90.0))
            .unwrap();
        scene
            .add_object(plane, material, Transform::default())
            .unwrap();
        scene
            .add_object(prism, material, Transform::new(Vec3::Z, 90.0))
            .unwrap();
        scene
    }

    #[test]
    fn uniforms_are_sixteen_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
        assert_eq!(std::mem::size_of::<GpuPointLight>(), 32);
    }

    #[test]
    fn batches_group_by_mesh() {
        let scene = two_mesh_scene();
        let (instances, batches) = build_batches(&scene);
        assert_eq!(instances.len(), 3);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].mesh, MeshHandle(0));
        assert_eq!(batches[0].instances, 0..1);
        assert_eq!(batches[1].mesh, MeshHandle(1));
        assert_eq!(batches[1].instances, 1..3);
        // Translation lives in the fourth column.
        assert_eq!(instances[1].model_3, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(instances[2].model_3, [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn unlit_scene_has_no_lights() {
        let uniforms = build_uniforms(&Scene::new(), &RenderView::default());
        assert_eq!(uniforms.light_count[0], 0);
        assert_eq!(uniforms.sun_colour[..3], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn lights_reach_the_uniforms() {
        let mut scene = Scene::new();
        let setup = LightingSetup::default();
        scene.setup_lighting(&setup).unwrap();
        let uniforms = build_uniforms(&scene, &RenderView::default());
        assert_eq!(uniforms.light_count[0], 1);
        assert_eq!(
            uniforms.point_lights[0].position_radius,
            [0.0, 3.0, 0.0, setup.point.radius]
        );
        let d = scene.lights().directional().unwrap().direction;
        assert_eq!(uniforms.sun_direction, [d.x, d.y, d.z, 0.0]);
        assert_eq!(uniforms.eye[..3], scene.camera().eye.to_array());
    }

    #[test]
    fn view_projection_matches_render_view() {
        let scene = Scene::new();
        let view = RenderView::default();
        let uniforms = build_uniforms(&scene, &view);
        assert_eq!(
            uniforms.view_proj,
            view.view_projection(scene.camera()).to_cols_array_2d()
        );
        assert_ne!(uniforms.view_proj, Mat4::IDENTITY.to_cols_array_2d());
    }
}
