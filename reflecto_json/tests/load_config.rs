use std::io::Write;

use reflecto::{Simulation, StepParams};
use reflecto_json::load_config;

const SCENE: &str = r#"{
    "mirrors": [
        [[100, -100], [100, 100]],
        [[-100, -100], [-100, 100]]
    ],
    "sources": [{ "start": [0, 0], "color": "red" }],
    "angles": { "start": 0, "end": 1, "step": 1 },
    "iterations": 150,
    "escape_distance": 0
}"#;

fn write_scene(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_and_run() {
    let file = write_scene(SCENE);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.mirrors.len(), 2);
    assert_eq!(
        config.params,
        StepParams {
            escape_distance: 0.,
            ..Default::default()
        }
    );

    let rays = Simulation::new(config).unwrap().run_to_end();
    assert_eq!(rays.len(), 1);

    // bounced off the right mirror after 100 ticks, now heading left
    let ray = &rays[0];
    assert!((ray.heading - 180.).abs() < 1e-9);
    assert!((ray.position.x - 48.).abs() < 1e-9, "{:?}", ray.position);
}

#[test]
fn missing_file() {
    let e = load_config("this/scene/does/not/exist.json").unwrap_err();
    assert!(e.to_string().starts_with("cannot open"));
}

#[test]
fn malformed_file() {
    let file = write_scene("{ \"mirrors\": [");
    let e = load_config(file.path()).unwrap_err();
    assert!(e.to_string().starts_with("cannot parse"));

    let file = write_scene(r#"{ "mirrors": [], "sources": [], "angles": {}, "iterations": 1 }"#);
    assert!(load_config(file.path()).is_err());
}
