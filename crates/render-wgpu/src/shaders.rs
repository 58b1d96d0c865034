/// WGSL shader for lit instanced props (boxes and cones).
pub const PROP_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    ambient: vec4<f32>,
    light0_dir: vec4<f32>,
    light0_color: vec4<f32>,
    light1_dir: vec4<f32>,
    light1_color: vec4<f32>,
    sky_top: vec4<f32>,
    sky_bottom: vec4<f32>,
    sky_center: vec4<f32>,
    sky_params: vec4<f32>, // offset, exponent, dome_radius, unused
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec4<f32>,
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
    let world_normal = (model * vec4<f32>(vertex.normal, 0.0)).xyz;

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * world_pos;
    out.world_normal = normalize(world_normal);
    out.color = instance.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    var lighting = uniforms.ambient.rgb;
    lighting += uniforms.light0_color.rgb
        * max(dot(n, -uniforms.light0_dir.xyz), 0.0);
    lighting += uniforms.light1_color.rgb
        * max(dot(n, -uniforms.light1_dir.xyz), 0.0);
    return vec4<f32>(in.color.rgb * min(lighting, vec3<f32>(1.0)), in.color.a);
}
"#;

/// WGSL shader for the gradient sky dome.
///
/// Mixes bottom to top color by the height of the normalized world
/// direction, offset and sharpened the same way the store's dome shades.
pub const SKY_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    ambient: vec4<f32>,
    light0_dir: vec4<f32>,
    light0_color: vec4<f32>,
    light1_dir: vec4<f32>,
    light1_color: vec4<f32>,
    sky_top: vec4<f32>,
    sky_bottom: vec4<f32>,
    sky_center: vec4<f32>,
    sky_params: vec4<f32>, // offset, exponent, dome_radius, unused
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct SkyOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
};

@vertex
fn vs_sky(@location(0) position: vec3<f32>, @location(1) _normal: vec3<f32>) -> SkyOutput {
    let world = position * uniforms.sky_params.z + uniforms.sky_center.xyz;
    var out: SkyOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(world, 1.0);
    out.world_position = world;
    return out;
}

@fragment
fn fs_sky(in: SkyOutput) -> @location(0) vec4<f32> {
    let offset = uniforms.sky_params.x;
    let exponent = uniforms.sky_params.y;
    let h = normalize(in.world_position + vec3<f32>(0.0, offset, 0.0)).y;
    let t = max(pow(max(h, 0.0), exponent), 0.0);
    return vec4<f32>(mix(uniforms.sky_bottom.rgb, uniforms.sky_top.rgb, t), 1.0);
}
"#;
