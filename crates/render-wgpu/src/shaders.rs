use hexworld_scene::ShaderKind;

/// Vertex-coloured geometry lit by one directional light and the scene's
/// point lights. Point light count lives in `light_count.x`.
pub const BASE_COLOUR_SHADER: &str = r#"
const MAX_POINT_LIGHTS: u32 = 8u;
const AMBIENT: f32 = 0.15;

struct PointLight {
    position_radius: vec4<f32>,
    colour: vec4<f32>,
};

struct Uniforms {
    view_proj: mat4x4<f32>,
    eye: vec4<f32>,
    sun_direction: vec4<f32>,
    sun_colour: vec4<f32>,
    light_count: vec4<u32>,
    point_lights: array<PointLight, 8>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) colour: vec3<f32>,
    @location(2) normal: vec3<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) tint: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) colour: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world_pos = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_position = world_pos.xyz;
    out.world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.colour = vertex.colour * instance.tint.rgb;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    var light = vec3<f32>(AMBIENT);
    light += uniforms.sun_colour.rgb * max(dot(n, -uniforms.sun_direction.xyz), 0.0);

    let count = min(uniforms.light_count.x, MAX_POINT_LIGHTS);
    for (var i = 0u; i < count; i++) {
        let pl = uniforms.point_lights[i];
        let to_light = pl.position_radius.xyz - in.world_position;
        let dist = length(to_light);
        let falloff = clamp(1.0 - dist / pl.position_radius.w, 0.0, 1.0);
        let lambert = max(dot(n, to_light / max(dist, 0.0001)), 0.0);
        light += pl.colour.rgb * lambert * falloff * falloff;
    }
    return vec4<f32>(in.colour * light, 1.0);
}
"#;

pub fn source(kind: ShaderKind) -> &'static str {
    match kind {
        ShaderKind::BaseColour => BASE_COLOUR_SHADER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_colour_shader_has_entry_points() {
        let src = source(ShaderKind::BaseColour);
        assert!(src.contains("fn vs_main"));
        assert!(src.contains("fn fs_main"));
    }

    #[test]
    fn shader_light_capacity_matches_scene() {
        let needle = format!("array<PointLight, {}>", hexworld_scene::MAX_POINT_LIGHTS);
        assert!(BASE_COLOUR_SHADER.contains(&needle));
        let constant = format!("MAX_POINT_LIGHTS: u32 = {}u", hexworld_scene::MAX_POINT_LIGHTS);
        assert!(BASE_COLOUR_SHADER.contains(&constant));
    }
}
