use perlin_engine::{draw, EngineConfig, EngineError, MemorySurface, NoiseEngine, PerlinEngine};

const GOLDEN_SEED_42_4X4: [u8; 64] = [
    128, 128, 128, 255, 140, 140, 140, 255, 152, 152, 152, 255, 160, 160, 160, 255, //
    128, 128, 128, 255, 140, 140, 140, 255, 152, 152, 152, 255, 161, 161, 161, 255, //
    128, 128, 128, 255, 139, 139, 139, 255, 150, 150, 150, 255, 159, 159, 159, 255, //
    128, 128, 128, 255, 136, 136, 136, 255, 145, 145, 145, 255, 152, 152, 152, 255,
];

fn golden_config() -> EngineConfig {
    EngineConfig::default()
        .with_seed(42)
        .with_octaves(1)
        .with_persistence(0.5)
        .with_lacunarity(2.0)
        .with_scale(0.1)
}

#[test]
fn seed_42_four_by_four_matches_golden() {
    let mut surface = MemorySurface::new(4, 4);
    draw(&mut surface, 4, 4, Some(&golden_config())).unwrap();
    let buffer = surface.take().unwrap();
    assert_eq!(buffer.as_bytes(), &GOLDEN_SEED_42_4X4[..]);
}

#[test]
fn draws_are_deterministic_across_engines() {
    let config = EngineConfig::default().with_seed(1234).with_octaves(6);
    let a = PerlinEngine::new(1234u64).render(&config, 64, 48).unwrap();
    let b = PerlinEngine::new(1234u64).render(&config, 64, 48).unwrap();
    assert_eq!(a, b);
}

#[test]
fn repeated_draws_on_one_engine_are_identical() {
    let engine = PerlinEngine::new(42u64);
    let config = golden_config();
    let mut surface = MemorySurface::new(4, 4);
    for _ in 0..3 {
        engine.draw(&mut surface, 4, 4, Some(&config)).unwrap();
        assert_eq!(surface.last().unwrap().as_bytes(), &GOLDEN_SEED_42_4X4[..]);
    }
    assert_eq!(surface.commits(), 3);
}

#[test]
fn one_pixel_draw() {
    let mut surface = MemorySurface::new(1, 1);
    draw(&mut surface, 1, 1, None).unwrap();
    assert_eq!(surface.last().unwrap().as_bytes().len(), 4);
}

#[test]
fn zero_width_is_invalid_dimension() {
    let mut surface = MemorySurface::new(1, 1);
    assert_eq!(
        draw(&mut surface, 0, 1, None),
        Err(EngineError::InvalidDimension { width: 0, height: 1 })
    );
    assert_eq!(surface.commits(), 0);
}

#[test]
fn bad_octaves_and_persistence_are_invalid_config() {
    let mut surface = MemorySurface::new(4, 4);
    let zero_octaves = golden_config().with_octaves(0);
    let flat_persistence = golden_config().with_persistence(1.0);
    for bad in [zero_octaves, flat_persistence] {
        assert!(matches!(
            draw(&mut surface, 4, 4, Some(&bad)),
            Err(EngineError::InvalidConfig(_))
        ));
    }
    assert!(surface.last().is_none());
}

#[test]
fn surface_size_mismatch_is_reported() {
    let mut surface = MemorySurface::new(8, 8);
    assert!(matches!(draw(&mut surface, 4, 4, None), Err(EngineError::SurfaceWriteFailure(_))));
}

#[test]
fn cells_are_measured_against_the_canvas() {
    // 0.4 cells over 4 pixels is the golden scale of 0.1
    let config = golden_config().with_scale(1.0).with_cells(0.4);
    let mut surface = MemorySurface::new(4, 4);
    draw(&mut surface, 4, 4, Some(&config)).unwrap();
    assert_eq!(surface.last().unwrap().as_bytes(), &GOLDEN_SEED_42_4X4[..]);
}

#[test]
fn golden_config_loads_from_ron() {
    let text = "(seed: 42, octaves: 1, persistence: 0.5, lacunarity: 2.0, scale: 0.1)";
    let config = EngineConfig::from_ron_str(text).unwrap();
    assert_eq!(config, golden_config());
}
