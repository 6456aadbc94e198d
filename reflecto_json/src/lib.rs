use reflecto::*;
use std::{error::Error, fs::File, io::BufReader, path::Path};

extern crate alloc;

use alloc::{boxed::Box, rc::Rc, sync::Arc, vec::Vec};
use core::ops::Deref;

pub use serde_json;

/// This is essentially `try_into` then `try_map` but the latter is nightly-only
pub fn json_array_to_float_array<const D: usize>(
    json_array: &[serde_json::Value],
) -> Option<[Float; D]> {
    let array: &[serde_json::Value; D] = json_array.try_into().ok()?;

    let mut coords = [0.; D];
    for (coord, value) in coords.iter_mut().zip(array) {
        *coord = value.as_f64()? as Float;
    }
    Some(coords)
}

pub fn json_to_point(json: &serde_json::Value) -> Option<Point> {
    json.as_array()
        .map(Vec::as_slice)
        .and_then(json_array_to_float_array::<2>)
        .map(Point::from)
}

pub fn map_json_array<C: FromIterator<T>, T>(
    json: &serde_json::Value,
    map: impl FnMut(&serde_json::Value) -> Result<T, Box<dyn Error>>,
) -> Result<C, Box<dyn Error>> {
    json.as_array()
        .ok_or("json value must be an array")?
        .iter()
        .map(map)
        .collect()
}

fn get<'a>(json: &'a serde_json::Value, key: &str) -> Result<&'a serde_json::Value, Box<dyn Error>> {
    json.get(key).ok_or_else(|| format!("missing field \"{key}\"").into())
}

fn get_i64(json: &serde_json::Value, key: &str) -> Result<i64, Box<dyn Error>> {
    get(json, key)?
        .as_i64()
        .ok_or_else(|| format!("field \"{key}\" must be an integer").into())
}

fn get_float_or(json: &serde_json::Value, key: &str, default: Float) -> Result<Float, Box<dyn Error>> {
    json.get(key).map_or(Ok(default), |value| {
        value
            .as_f64()
            .ok_or_else(|| format!("field \"{key}\" must be a number").into())
    })
}

pub trait JsonSer {
    /// Serialize `self` into a JSON object.
    fn to_json(&self) -> serde_json::Value;
}

impl<T: JsonSer> JsonSer for [T] {
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(Vec::from_iter(self.iter().map(T::to_json)))
    }
}

impl<const N: usize, T: JsonSer> JsonSer for [T; N] {
    fn to_json(&self) -> serde_json::Value {
        self.as_slice().to_json()
    }
}

// It's clear that all these impls use the `Deref` trait, but writing a blanket impl over all
// types implementing `Deref` makes the trait unusable downstream

impl<T: JsonSer + ?Sized> JsonSer for Box<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Arc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for Rc<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer> JsonSer for Vec<T> {
    fn to_json(&self) -> serde_json::Value {
        self.deref().to_json()
    }
}

impl<T: JsonSer + ?Sized> JsonSer for &T {
    fn to_json(&self) -> serde_json::Value {
        (*self).to_json()
    }
}

impl JsonSer for Point {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.x, self.y])
    }
}

impl JsonSer for MirrorSegment {
    /// Serialize a mirror into a JSON array.
    ///
    /// The format of the returned value is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        self.endpoints().to_json()
    }
}

impl JsonSer for RaySource {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start.to_json(),
            "color": self.color,
        })
    }
}

impl JsonSer for Ray {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "position": self.position.to_json(),
            "heading": self.heading,
            "color": self.color,
        })
    }
}

impl JsonSer for AngleRange {
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "start": self.start(),
            "end": self.end(),
            "step": self.step(),
        })
    }
}

impl JsonSer for SimulationConfig {
    /// Serialize a whole scene.
    ///
    /// The format of the returned object is explained in [`Self::from_json`]
    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "mirrors": self.mirrors.to_json(),
            "sources": self.sources.to_json(),
            "angles": self.angles.to_json(),
            "iterations": self.iterations,
            "margin": self.params.margin,
            "escape_distance": self.params.escape_distance,
            "step_length": self.params.step_length,
        })
    }
}

pub trait JsonDes {
    /// Deserialize from a JSON object.
    ///
    /// Returns an error if `json`'s format or values are invalid.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>>
    where
        Self: Sized;
}

impl<T: JsonDes> JsonDes for Vec<T> {
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        map_json_array(json, T::from_json)
    }
}

impl JsonDes for MirrorSegment {
    /// Deserialize a new mirror from a JSON array of two points:
    ///
    /// ```json
    /// [[100, -100], [100, 100]]
    /// ```
    ///
    /// The two points must be different.
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let [start, end]: &[serde_json::Value; 2] = json
            .as_array()
            .map(Vec::as_slice)
            .and_then(|points| points.try_into().ok())
            .ok_or("a mirror must be an array of two points")?;

        let start = json_to_point(start).ok_or("Invalid mirror start point")?;
        let end = json_to_point(end).ok_or("Invalid mirror end point")?;

        Ok(Self::try_new(start, end)?)
    }
}

impl JsonDes for RaySource {
    /// Deserialize a new ray source from a JSON object:
    ///
    /// ```json
    /// {
    ///     "start": [0, 0],
    ///     "color": "red"
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let start = json_to_point(get(json, "start")?).ok_or("Invalid ray source start point")?;

        let color = get(json, "color")?
            .as_str()
            .ok_or("ray source color must be a string")?;

        Ok(Self::new(start, color))
    }
}

impl JsonDes for AngleRange {
    /// Deserialize an angle range from a JSON object:
    ///
    /// ```json
    /// {
    ///     "start": 0,
    ///     "end": 360, // excluded
    ///     "step": 10 // must not be zero
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        Ok(Self::try_new(
            get_i64(json, "start")?,
            get_i64(json, "end")?,
            get_i64(json, "step")?,
        )?)
    }
}

impl JsonDes for SimulationConfig {
    /// Deserialize a whole scene from a JSON object:
    ///
    /// ```json
    /// {
    ///     "mirrors": [[[x, y], [x, y]], ...],
    ///     "sources": [{ "start": [x, y], "color": "red" }, ...], // "rays" works too
    ///     "angles": { "start": 0, "end": 360, "step": 10 },
    ///     "iterations": 1000,
    ///     "margin": 1.4142, // optional
    ///     "escape_distance": 1000, // optional
    ///     "step_length": 1 // optional
    /// }
    /// ```
    fn from_json(json: &serde_json::Value) -> Result<Self, Box<dyn Error>> {
        let mirrors = Vec::<MirrorSegment>::from_json(get(json, "mirrors")?)
            .map_err(|e| format!("invalid mirrors: {e}"))?;

        let sources = json
            .get("sources")
            .or_else(|| json.get("rays"))
            .ok_or(r#"missing field "sources""#)?;

        let sources = Vec::<RaySource>::from_json(sources).map_err(|e| format!("invalid sources: {e}"))?;

        let angles =
            AngleRange::from_json(get(json, "angles")?).map_err(|e| format!("invalid angles: {e}"))?;

        let iterations: usize = get(json, "iterations")?
            .as_u64()
            .ok_or(r#"field "iterations" must be a positive integer"#)?
            .try_into()?;

        let defaults = StepParams::default();

        let params = StepParams {
            margin: get_float_or(json, "margin", defaults.margin)?,
            escape_distance: get_float_or(json, "escape_distance", defaults.escape_distance)?,
            step_length: get_float_or(json, "step_length", defaults.step_length)?,
        };

        params.validate()?;

        Ok(Self {
            mirrors,
            sources,
            angles,
            iterations,
            params,
        })
    }
}

/// The state of all rays after `tick` ticks.
pub fn serialize_rays(tick: usize, rays: &[Ray]) -> serde_json::Value {
    serde_json::json!({
        "tick": tick,
        "rays": rays.to_json(),
    })
}

pub fn deserialize_rays(json: &serde_json::Value) -> Result<(usize, Vec<Ray>), Box<dyn Error>> {
    let tick: usize = get(json, "tick")?
        .as_u64()
        .ok_or(r#"field "tick" must be a positive integer"#)?
        .try_into()?;

    let rays = map_json_array(get(json, "rays")?, |ray| {
        let position = json_to_point(get(ray, "position")?).ok_or("Invalid ray position")?;
        let heading = get(ray, "heading")?
            .as_f64()
            .ok_or("ray heading must be a number")?;
        let color = get(ray, "color")?
            .as_str()
            .ok_or("ray color must be a string")?;
        Ok(Ray::new(position, heading, color))
    })?;

    Ok((tick, rays))
}

/// Read a scene from the JSON file at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulationConfig, Box<dyn Error>> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|e| format!("cannot open {}: {e}", path.display()))?;

    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("cannot parse {}: {e}", path.display()))?;

    let config = SimulationConfig::from_json(&json)?;

    log::debug!(
        "loaded {}: {} mirrors, {} sources, {} angles",
        path.display(),
        config.mirrors.len(),
        config.sources.len(),
        config.angles.len()
    );

    Ok(config)
}

/// Scene file loaded when none is specified
pub const DEFAULT_CONFIG_PATH: &str = "initial_conditions.json";
