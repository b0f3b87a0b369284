// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use quick_xml::events::attributes::Attributes;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::emitter::Light;
use crate::core::error::ConfigError;
use crate::core::scene::Scene;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::viewport::{Viewport, ViewportCamera};
use crate::shapes::sphere::Sphere;

#[derive(Debug)]
pub enum SceneLoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    Config(ConfigError),
}

impl From<std::io::Error> for SceneLoadError {
    fn from(err: std::io::Error) -> Self {
        SceneLoadError::Io(err)
    }
}

impl From<ConfigError> for SceneLoadError {
    fn from(err: ConfigError) -> Self {
        SceneLoadError::Config(err)
    }
}

impl fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneLoadError::Io(err) => write!(f, "io error: {}", err),
            SceneLoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            SceneLoadError::MissingField(field) => write!(f, "missing field: {}", field),
            SceneLoadError::Config(err) => write!(f, "invalid scene: {}", err),
        }
    }
}

impl std::error::Error for SceneLoadError {}

pub struct SceneLoadResult {
    pub scene: Scene,
    pub camera: Option<ViewportCamera>,
    pub max_depth: Option<u32>,
    pub background: Option<RGBSpectrum>,
}

pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<Scene, SceneLoadError> {
    let result = load_scene_with_settings(path)?;
    Ok(result.scene)
}

pub fn load_scene_with_settings<P: AsRef<Path>>(path: P) -> Result<SceneLoadResult, SceneLoadError> {
    let path = path.as_ref();
    log::info!("Loading scene from: {}.", path.display());
    let xml = fs::read_to_string(path)?;
    parse_scene(&xml)
}

#[derive(Clone, Copy, PartialEq)]
enum Block {
    None,
    Integrator,
    Sensor,
    Film,
    Shape,
    Emitter,
}

/// One `<float|integer|rgb|point|vector name=.. value=..>` property.
struct Property {
    name: String,
    value: String,
}

#[derive(Default)]
struct SensorState {
    origin: Option<Vector3f>,
    width: Option<Float>,
    height: Option<Float>,
    distance: Option<Float>,
    film_width: Option<usize>,
    film_height: Option<usize>,
}

#[derive(Default)]
struct ShapeState {
    center: Option<Vector3f>,
    radius: Option<Float>,
    color: Option<RGBSpectrum>,
    specular: Option<i64>,
    reflective: Option<Float>,
}

#[derive(Default)]
struct EmitterState {
    kind: String,
    intensity: Option<Float>,
    position: Option<Vector3f>,
    direction: Option<Vector3f>,
}

pub fn parse_scene(xml: &str) -> Result<SceneLoadResult, SceneLoadError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut defaults: HashMap<String, String> = HashMap::new();
    let mut block = Block::None;

    let mut spheres: Vec<Sphere> = Vec::new();
    let mut lights: Vec<Light> = Vec::new();
    let mut camera: Option<ViewportCamera> = None;
    let mut max_depth: Option<u32> = None;
    let mut background: Option<RGBSpectrum> = None;

    let mut sensor = SensorState::default();
    let mut shape = ShapeState::default();
    let mut emitter = EmitterState::default();

    loop {
        let event = reader.read_event_into(&mut buf)
            .map_err(|e| SceneLoadError::Parse(e.to_string()))?;
        match event {
            Event::Eof => break,
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match e.name().as_ref() {
                    b"default" => {
                        let property = read_property(e.attributes(), &HashMap::new())?;
                        defaults.insert(property.name, property.value);
                    }
                    b"integrator" => {
                        let kind = read_type(e.attributes(), &defaults)?;
                        if kind != "whitted" {
                            return Err(SceneLoadError::Parse(format!("unsupported integrator: {}", kind)));
                        }
                        block = Block::Integrator;
                    }
                    b"sensor" => {
                        let kind = read_type(e.attributes(), &defaults)?;
                        if kind != "viewport" {
                            return Err(SceneLoadError::Parse(format!("unsupported sensor: {}", kind)));
                        }
                        sensor = SensorState::default();
                        block = Block::Sensor;
                    }
                    b"film" => {
                        if block == Block::Sensor {
                            block = Block::Film;
                        }
                    }
                    b"shape" => {
                        let kind = read_type(e.attributes(), &defaults)?;
                        if kind != "sphere" {
                            return Err(SceneLoadError::Parse(format!("unsupported shape: {}", kind)));
                        }
                        shape = ShapeState::default();
                        block = Block::Shape;
                    }
                    b"emitter" => {
                        let kind = read_type(e.attributes(), &defaults)?;
                        emitter = EmitterState { kind, ..EmitterState::default() };
                        block = Block::Emitter;
                    }
                    b"float" | b"integer" | b"rgb" | b"point" | b"vector" => {
                        let property = read_property(e.attributes(), &defaults)?;
                        match (block, e.name().as_ref(), property.name.as_str()) {
                            (Block::Integrator, b"integer", "max_depth") => {
                                max_depth = Some(parse_u32(&property.value)?);
                            }
                            (Block::Integrator, b"rgb", "background") => {
                                background = Some(parse_vec3_spectrum(&property.value)?);
                            }
                            (Block::Sensor, b"point", "origin") => {
                                sensor.origin = Some(parse_vec3(&property.value)?);
                            }
                            (Block::Sensor, b"float", "width") => sensor.width = Some(parse_float(&property.value)?),
                            (Block::Sensor, b"float", "height") => sensor.height = Some(parse_float(&property.value)?),
                            (Block::Sensor, b"float", "distance") => sensor.distance = Some(parse_float(&property.value)?),
                            (Block::Film, b"integer", "width") => sensor.film_width = Some(parse_usize(&property.value)?),
                            (Block::Film, b"integer", "height") => sensor.film_height = Some(parse_usize(&property.value)?),
                            (Block::Shape, b"point", "center") => shape.center = Some(parse_vec3(&property.value)?),
                            (Block::Shape, b"float", "radius") => shape.radius = Some(parse_float(&property.value)?),
                            (Block::Shape, b"rgb", "color") => shape.color = Some(parse_vec3_spectrum(&property.value)?),
                            (Block::Shape, b"integer", "specular") => shape.specular = Some(parse_i64(&property.value)?),
                            (Block::Shape, b"float", "reflective") => shape.reflective = Some(parse_float(&property.value)?),
                            (Block::Emitter, b"float", "intensity") => emitter.intensity = Some(parse_float(&property.value)?),
                            (Block::Emitter, b"point", "position") => emitter.position = Some(parse_vec3(&property.value)?),
                            (Block::Emitter, b"vector", "direction") => emitter.direction = Some(parse_vec3(&property.value)?),
                            (_, _, name) => {
                                log::warn!("Ignoring unknown property '{}'.", name);
                            }
                        }
                    }
                    b"scene" => {}
                    other => {
                        log::warn!("Ignoring unknown element <{}>.", String::from_utf8_lossy(other));
                    }
                }

                // Self-closing blocks end right away.
                if is_empty {
                    close_block(e.name().as_ref(), &mut block, &sensor, &shape, &emitter,
                                &mut camera, &mut spheres, &mut lights)?;
                }
            }
            Event::End(ref e) => {
                close_block(e.name().as_ref(), &mut block, &sensor, &shape, &emitter,
                            &mut camera, &mut spheres, &mut lights)?;
            }
            _ => {}
        }

        buf.clear();
    }

    let scene = Scene::new(spheres, lights)?;
    log::info!("Scene loaded: {} spheres, {} lights.", scene.len(), scene.lights().len());

    Ok(SceneLoadResult {
        scene,
        camera,
        max_depth,
        background,
    })
}

#[allow(clippy::too_many_arguments)]
fn close_block(name: &[u8],
               block: &mut Block,
               sensor: &SensorState,
               shape: &ShapeState,
               emitter: &EmitterState,
               camera: &mut Option<ViewportCamera>,
               spheres: &mut Vec<Sphere>,
               lights: &mut Vec<Light>) -> Result<(), SceneLoadError> {
    match name {
        b"integrator" => *block = Block::None,
        b"film" => {
            if *block == Block::Film {
                *block = Block::Sensor;
            }
        }
        b"sensor" => {
            let defaults = Viewport::default();
            let viewport = Viewport {
                width: sensor.width.unwrap_or(defaults.width),
                height: sensor.height.unwrap_or(defaults.height),
                distance: sensor.distance.unwrap_or(defaults.distance),
            };
            let width = sensor.film_width.ok_or(SceneLoadError::MissingField("film.width"))?;
            let height = sensor.film_height.ok_or(SceneLoadError::MissingField("film.height"))?;
            let origin = sensor.origin.unwrap_or_else(Vector3f::zeros);
            *camera = Some(ViewportCamera::new(origin, viewport, width, height)?);
            *block = Block::None;
        }
        b"shape" => {
            let center = shape.center.ok_or(SceneLoadError::MissingField("shape.center"))?;
            let radius = shape.radius.ok_or(SceneLoadError::MissingField("shape.radius"))?;
            let color = shape.color.ok_or(SceneLoadError::MissingField("shape.color"))?;
            let mut sphere = Sphere::new(center, radius, color)
                .with_reflective(shape.reflective.unwrap_or(0.0));
            match shape.specular {
                None | Some(-1) => {}
                Some(s) if s >= 0 && s <= u32::MAX as i64 => sphere = sphere.with_specular(s as u32),
                Some(s) => {
                    return Err(SceneLoadError::Parse(format!("invalid specular exponent: {}", s)));
                }
            }
            spheres.push(sphere);
            *block = Block::None;
        }
        b"emitter" => {
            let intensity = emitter.intensity.ok_or(SceneLoadError::MissingField("emitter.intensity"))?;
            let light = match emitter.kind.as_str() {
                "ambient" => Light::ambient(intensity),
                "point" => {
                    let position = emitter.position.ok_or(SceneLoadError::MissingField("emitter.position"))?;
                    Light::point(intensity, position)
                }
                "directional" => {
                    let direction = emitter.direction.ok_or(SceneLoadError::MissingField("emitter.direction"))?;
                    Light::directional(intensity, direction)
                }
                other => return Err(SceneLoadError::Parse(format!("unsupported emitter: {}", other))),
            };
            lights.push(light);
            *block = Block::None;
        }
        _ => {}
    }
    Ok(())
}

fn read_type(attributes: Attributes, defaults: &HashMap<String, String>) -> Result<String, SceneLoadError> {
    for attr in attributes.flatten() {
        if attr.key.as_ref() == b"type" {
            return Ok(resolve_value(&attr.unescape_value().unwrap_or_default(), defaults));
        }
    }
    Err(SceneLoadError::MissingField("type"))
}

fn read_property(attributes: Attributes, defaults: &HashMap<String, String>) -> Result<Property, SceneLoadError> {
    let mut name: Option<String> = None;
    let mut value: Option<String> = None;
    for attr in attributes.flatten() {
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value().unwrap_or_default().to_string()),
            b"value" => value = Some(resolve_value(&attr.unescape_value().unwrap_or_default(), defaults)),
            _ => {}
        }
    }
    Ok(Property {
        name: name.ok_or(SceneLoadError::MissingField("name"))?,
        value: value.ok_or(SceneLoadError::MissingField("value"))?,
    })
}

/// Expand `$name` references. A name runs over `[A-Za-z0-9_]`, so `$depth`
/// never matches a default called `d`. Unknown names are left untouched.
fn resolve_value(raw: &str, defaults: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let name = &after[..name_len];
        match defaults.get(name) {
            Some(value) if !name.is_empty() => out.push_str(value),
            _ => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[name_len..];
    }
    out.push_str(rest);
    out
}

fn parse_float(value: &str) -> Result<Float, SceneLoadError> {
    value.trim().parse::<Float>().map_err(|_| SceneLoadError::Parse(format!("invalid float: {}", value)))
}

fn parse_u32(value: &str) -> Result<u32, SceneLoadError> {
    value.trim().parse::<u32>().map_err(|_| SceneLoadError::Parse(format!("invalid u32: {}", value)))
}

fn parse_i64(value: &str) -> Result<i64, SceneLoadError> {
    value.trim().parse::<i64>().map_err(|_| SceneLoadError::Parse(format!("invalid integer: {}", value)))
}

fn parse_usize(value: &str) -> Result<usize, SceneLoadError> {
    value.trim().parse::<usize>().map_err(|_| SceneLoadError::Parse(format!("invalid usize: {}", value)))
}

fn parse_vec3(value: &str) -> Result<Vector3f, SceneLoadError> {
    let mut parts = value.split(',').map(|s| s.trim()).filter(|s| !s.is_empty());
    let x = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let y = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    let z = parts.next().ok_or_else(|| SceneLoadError::Parse("invalid vec3".to_string()))?;
    if parts.next().is_some() {
        return Err(SceneLoadError::Parse(format!("too many components: {}", value)));
    }
    Ok(Vector3f::new(parse_float(x)?, parse_float(y)?, parse_float(z)?))
}

fn parse_vec3_spectrum(value: &str) -> Result<RGBSpectrum, SceneLoadError> {
    let v = parse_vec3(value)?;
    Ok(RGBSpectrum::new(v.x, v.y, v.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SPHERE_XML: &str = r#"
        <scene>
            <default name="depth" value="4"/>
            <integrator type="whitted">
                <integer name="max_depth" value="$depth"/>
                <rgb name="background" value="0, 0, 0.5"/>
            </integrator>
            <sensor type="viewport">
                <point name="origin" value="0, 0, 0"/>
                <float name="width" value="1"/>
                <float name="height" value="1"/>
                <float name="distance" value="1"/>
                <film>
                    <integer name="width" value="500"/>
                    <integer name="height" value="400"/>
                </film>
            </sensor>
            <shape type="sphere">
                <point name="center" value="0, -1, 3"/>
                <float name="radius" value="1"/>
                <rgb name="color" value="1, 0, 0"/>
                <integer name="specular" value="-1"/>
            </shape>
            <shape type="sphere">
                <point name="center" value="2, 0, 4"/>
                <float name="radius" value="1"/>
                <rgb name="color" value="0, 0, 1"/>
                <integer name="specular" value="500"/>
                <float name="reflective" value="0.3"/>
            </shape>
            <emitter type="ambient">
                <float name="intensity" value="0.2"/>
            </emitter>
            <emitter type="point">
                <float name="intensity" value="0.6"/>
                <point name="position" value="2, 1, 0"/>
            </emitter>
            <emitter type="directional">
                <float name="intensity" value="0.4"/>
                <vector name="direction" value="1, 4, 4"/>
            </emitter>
        </scene>
    "#;

    #[test]
    fn test_parse_scene_full() {
        let result = parse_scene(RED_SPHERE_XML).unwrap();

        assert_eq!(result.max_depth, Some(4));
        assert_eq!(result.background, Some(RGBSpectrum::new(0.0, 0.0, 0.5)));

        let camera = result.camera.expect("camera");
        assert_eq!(camera.width(), 500);
        assert_eq!(camera.height(), 400);

        let spheres = result.scene.spheres();
        assert_eq!(spheres.len(), 2);
        assert_eq!(spheres[0].center, Vector3f::new(0.0, -1.0, 3.0));
        assert_eq!(spheres[0].specular, None);
        assert_eq!(spheres[0].reflective, 0.0);
        assert_eq!(spheres[1].specular, Some(500));
        assert_eq!(spheres[1].reflective, 0.3);

        let lights = result.scene.lights();
        assert_eq!(lights[0], Light::ambient(0.2));
        assert_eq!(lights[1], Light::point(0.6, Vector3f::new(2.0, 1.0, 0.0)));
        assert_eq!(lights[2], Light::directional(0.4, Vector3f::new(1.0, 4.0, 4.0)));
    }

    #[test]
    fn test_parse_scene_without_sensor() {
        let xml = r#"<scene><emitter type="ambient"><float name="intensity" value="1"/></emitter></scene>"#;
        let result = parse_scene(xml).unwrap();
        assert!(result.camera.is_none());
        assert!(result.max_depth.is_none());
        assert!(result.scene.is_empty());
    }

    #[test]
    fn test_parse_scene_missing_field() {
        let xml = r#"<scene><shape type="sphere"><float name="radius" value="1"/></shape></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::MissingField("shape.center"))));

        let xml = r#"<scene><emitter type="point"><float name="intensity" value="1"/></emitter></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::MissingField("emitter.position"))));
    }

    #[test]
    fn test_parse_scene_rejects_invalid_values() {
        let xml = r#"<scene><sensor type="viewport"><film>
            <integer name="width" value="0"/><integer name="height" value="10"/>
        </film></sensor></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Config(ConfigError::ZeroCanvas { .. }))));

        let xml = r#"<scene><shape type="sphere">
            <point name="center" value="0, 0, 3"/><float name="radius" value="1"/>
            <rgb name="color" value="1, 1, 1"/><float name="reflective" value="2"/>
        </shape></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Config(ConfigError::InvalidSphere { .. }))));

        let xml = r#"<scene><shape type="sphere">
            <point name="center" value="0, 0, 3"/><float name="radius" value="1"/>
            <rgb name="color" value="1, 1, 1"/><integer name="specular" value="-5"/>
        </shape></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));

        let xml = r#"<scene><shape type="cube"/></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));

        let xml = r#"<scene><shape type="sphere"><point name="center" value="0, 0"/></shape></scene>"#;
        assert!(matches!(parse_scene(xml), Err(SceneLoadError::Parse(_))));
    }

    #[test]
    fn test_resolve_value_prefers_whole_names() {
        let mut defaults = HashMap::new();
        defaults.insert("d".to_string(), "9".to_string());
        defaults.insert("depth".to_string(), "3".to_string());
        defaults.insert("r".to_string(), "0.5".to_string());

        assert_eq!(resolve_value("$depth", &defaults), "3");
        assert_eq!(resolve_value("$d", &defaults), "9");
        assert_eq!(resolve_value("$r, $d, $depth", &defaults), "0.5, 9, 3");
        assert_eq!(resolve_value("$missing, 1", &defaults), "$missing, 1");
        assert_eq!(resolve_value("cost $", &defaults), "cost $");
    }

    #[test]
    fn test_parse_scene_defaults_with_shared_prefix() {
        let xml = r#"
            <scene>
                <default name="d" value="9"/>
                <default name="depth" value="3"/>
                <integrator type="whitted">
                    <integer name="max_depth" value="$depth"/>
                </integrator>
            </scene>
        "#;
        for _ in 0..50 {
            assert_eq!(parse_scene(xml).unwrap().max_depth, Some(3));
        }
    }

    #[test]
    fn test_bundled_scene_matches_preset() {
        let result = parse_scene(include_str!("../../scenes/three_spheres.xml")).unwrap();
        assert_eq!(result.scene, crate::core::presets::three_spheres_on_floor().unwrap());
        assert_eq!(result.max_depth, Some(crate::core::presets::DEFAULT_MAX_DEPTH));
    }

    #[test]
    fn test_load_scene_missing_file() {
        assert!(matches!(load_scene("/nonexistent/mirrorball/scene.xml"), Err(SceneLoadError::Io(_))));
    }
}
