/// WGSL shader for every scene drawable.
///
/// Material index: -3 normal as color, -2 flat color, -1 UV as color,
/// 0..5 texture array layer, anything else the warning color.
pub const SCENE_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_position: vec4<f32>,
    light_color: vec4<f32>,
    spot_position: vec4<f32>,
    spot_direction: vec4<f32>,
    camera_position: vec4<f32>,
    // x: point light on, y: spotlight on, z: cos cutoff, w: exponent
    flags: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(0) @binding(1)
var textures: texture_2d_array<f32>;

@group(0) @binding(2)
var texture_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) color: vec4<f32>,
    @location(8) material: i32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
    @location(3) color: vec4<f32>,
    @location(4) @interpolate(flat) material: i32,
};

fn safe_normalize(v: vec3<f32>) -> vec3<f32> {
    let len = length(v);
    return select(vec3<f32>(0.0, 1.0, 0.0), v / len, len > 1e-6);
}

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let world = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * world;
    out.world_position = world.xyz;
    // Flat cubes have a zero scale axis; fall back to +Y rather than NaN.
    out.normal = safe_normalize((model * vec4<f32>(vertex.normal, 0.0)).xyz);
    out.uv = vertex.uv;
    out.color = instance.color;
    out.material = instance.material;
    return out;
}

fn base_color(in: VertexOutput) -> vec4<f32> {
    let sampled = textureSample(textures, texture_sampler, in.uv, max(in.material, 0));
    var color = vec4<f32>(1.0, 0.2, 0.2, 1.0);
    switch in.material {
        case -3: { color = vec4<f32>((in.normal + 1.0) / 2.0, 1.0); }
        case -2: { color = in.color; }
        case -1: { color = vec4<f32>(in.uv, 1.0, 1.0); }
        case 0, 1, 2, 3, 4, 5: { color = sampled; }
        default: {}
    }
    return color;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = base_color(in);
    if uniforms.flags.x < 0.5 {
        return base;
    }

    let n = safe_normalize(in.normal);
    let l = normalize(uniforms.light_position.xyz - in.world_position);
    let e = normalize(uniforms.camera_position.xyz - in.world_position);
    let r = reflect(-l, n);
    let light = uniforms.light_color.rgb;

    let specular = pow(max(dot(e, r), 0.0), 10.0);
    let diffuse = base.rgb * light * max(dot(n, l), 0.0) * 0.7;
    let ambient = base.rgb * light * 0.3;

    var spot = vec3<f32>(0.0);
    if uniforms.flags.y > 0.5 {
        let to_spot = normalize(uniforms.spot_position.xyz - in.world_position);
        let d = normalize(-uniforms.spot_direction.xyz);
        let spot_cos = dot(d, to_spot);
        if spot_cos >= uniforms.flags.z {
            spot = base.rgb * light * pow(spot_cos, uniforms.flags.w) * 1.7;
        }
    }

    return vec4<f32>(vec3<f32>(specular) + diffuse + ambient + spot, 1.0);
}
"#;
