//! Scene root
//!
//! Builds the node tree (starfield, player craft, meteor field), owns the
//! camera and lights, and wires the per-frame subscriptions and the pointer
//! mapper into the engine.

use crate::config::GameConfig;
use crate::meteor::MeteorField;
use crate::player::{CraftVisual, PlayerCraft};
use crate::pointer::PointerMapper;
use crate::starfield::Starfield;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use starfox_engine::foundation::math::constants::{PI, QUARTER_PI};
use starfox_engine::prelude::*;
use starfox_engine::render::{FrameStats, OrbitControls};
use std::cell::{Ref, RefCell};
use std::rc::Rc;

/// Random source used by every scene entity
pub type SceneRng = ChaCha8Rng;

/// Scene node handles that get synced every frame
struct SceneNodes {
    starfield: NodeId,
    meteors: Vec<NodeId>,
}

/// The starfox scene
pub struct StarfoxScene {
    config: GameConfig,
    graph: SceneGraph,
    camera: Camera,
    orbit: Option<OrbitControls>,
    lights: [DirectionalLight; 2],
    starfield: Rc<RefCell<Starfield<SceneRng>>>,
    meteors: Rc<RefCell<MeteorField<SceneRng>>>,
    model_slot: Option<AssetSlot<ModelAsset>>,
    player: Option<Rc<RefCell<PlayerCraft>>>,
    pointer: Option<PointerMapper>,
    nodes: Option<SceneNodes>,
    subscriptions: Vec<FrameSubscription>,
    last_stats: Option<FrameStats>,
}

impl StarfoxScene {
    /// Create the scene; entities are sampled immediately, nodes on mount
    pub fn new(config: GameConfig) -> Self {
        let mut seeds = match config.simulation.seed {
            Some(seed) => SceneRng::seed_from_u64(seed),
            None => SceneRng::from_entropy(),
        };
        let starfield = Starfield::from_config(&config.starfield, SceneRng::seed_from_u64(seeds.gen()));
        let meteors = MeteorField::from_config(&config.meteors, SceneRng::seed_from_u64(seeds.gen()));

        let [x, y, z] = config.camera.position;
        let camera = Camera::perspective(Vec3::new(x, y, z), config.camera.fov, 1.0, config.camera.near, config.camera.far);
        let orbit = config.camera.orbit_controls.then(|| OrbitControls {
            enable_zoom: false,
            min_azimuth: -QUARTER_PI,
            max_azimuth: QUARTER_PI,
            min_polar: 0.0,
            max_polar: PI,
        });

        Self {
            config,
            graph: SceneGraph::new(),
            camera,
            orbit,
            lights: [
                DirectionalLight::new(Vec3::new(-1.0, 1.0, -1.0), 0.5),
                DirectionalLight::new(Vec3::new(1.0, 1.0, 1.0), 0.5),
            ],
            starfield: Rc::new(RefCell::new(starfield)),
            meteors: Rc::new(RefCell::new(meteors)),
            model_slot: None,
            player: None,
            pointer: None,
            nodes: None,
            subscriptions: Vec::new(),
            last_stats: None,
        }
    }

    /// Builder pattern: Supply the craft model instead of loading it on mount
    #[must_use]
    pub fn with_model_slot(mut self, slot: AssetSlot<ModelAsset>) -> Self {
        self.model_slot = Some(slot);
        self
    }

    /// Orbit the camera, if orbit controls are enabled
    ///
    /// Returns the clamped `(azimuth, polar, distance)` that was applied.
    pub fn orbit(&mut self, azimuth: f32, polar: f32) -> Option<(f32, f32, f32)> {
        let controls = self.orbit.as_ref()?;
        let distance = (self.camera.position - self.camera.target).magnitude();
        Some(controls.apply(&mut self.camera, azimuth, polar, distance))
    }

    fn build(&mut self, engine: &Engine) -> Result<(), AppError> {
        let root = self.graph.root();

        let (stars, star_material) = {
            let mut starfield = self.starfield.borrow_mut();
            (starfield.points(self.config.starfield.count), starfield.material())
        };
        let starfield = self.graph.add(root, Node::group("starfield"))?;
        self.graph.add(starfield, Node::points("stars", stars, star_material))?;

        let mut player = match self.model_slot.take() {
            Some(slot) => PlayerCraft::new(self.config.player.clone(), slot),
            None => PlayerCraft::load(self.config.player.clone(), &engine.assets),
        };
        player.attach(&mut self.graph, root)?;

        let meteor_group = self.graph.add(root, Node::group("meteors"))?;
        let meteors = self
            .meteors
            .borrow()
            .units()
            .iter()
            .enumerate()
            .map(|(index, unit)| {
                let shape = unit.shape();
                let node = Node::mesh(format!("meteor-{index}"), shape.geometry(), shape.material())
                    .with_transform(unit.transform());
                self.graph.add(meteor_group, node)
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.player = Some(Rc::new(RefCell::new(player)));
        self.nodes = Some(SceneNodes { starfield, meteors });
        Ok(())
    }

    fn subscribe(&mut self, engine: &Engine) {
        if let Some(player) = &self.player {
            let player = Rc::clone(player);
            self.subscriptions.push(engine.frame_loop.subscribe("player-model", move |_| {
                player.borrow_mut().poll();
            }));
        }

        let starfield = Rc::clone(&self.starfield);
        self.subscriptions.push(engine.frame_loop.subscribe("starfield-drift", move |_| {
            starfield.borrow_mut().tick();
        }));

        let meteors = Rc::clone(&self.meteors);
        self.subscriptions.push(engine.frame_loop.subscribe("meteors", move |tick| {
            let resets = meteors.borrow_mut().tick();
            log::trace!("Frame {}: {} meteor reset(s)", tick.frame, resets);
        }));
    }

    fn sync(&mut self) -> Result<(), SceneError> {
        let Some(nodes) = &self.nodes else {
            return Ok(());
        };

        *self.graph.transform_mut(nodes.starfield)? = self.starfield.borrow().transform();

        let meteors = self.meteors.borrow();
        for (id, unit) in nodes.meteors.iter().zip(meteors.units()) {
            *self.graph.transform_mut(*id)? = unit.transform();
        }

        if let Some(player) = &self.player {
            player.borrow_mut().sync(&mut self.graph)?;
        }
        Ok(())
    }

    /// Scene graph
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Active camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Scene lights
    pub fn lights(&self) -> &[DirectionalLight] {
        &self.lights
    }

    /// Statistics of the last rendered frame
    pub fn last_stats(&self) -> Option<FrameStats> {
        self.last_stats
    }

    /// Meteor field
    pub fn meteors(&self) -> Ref<'_, MeteorField<SceneRng>> {
        self.meteors.borrow()
    }

    /// Starfield
    pub fn starfield(&self) -> Ref<'_, Starfield<SceneRng>> {
        self.starfield.borrow()
    }

    /// Body the craft currently shows, once mounted
    pub fn craft_visual(&self) -> Option<CraftVisual> {
        self.player.as_ref().map(|player| player.borrow().visual())
    }

    /// Craft container position, once mounted
    pub fn craft_position(&self) -> Option<Vec3> {
        self.player.as_ref().map(|player| player.borrow().position())
    }

    /// Whether the pointer mapper is listening
    pub fn pointer_mounted(&self) -> bool {
        self.pointer.as_ref().is_some_and(PointerMapper::is_mounted)
    }
}

impl Application for StarfoxScene {
    fn mount(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let surface = engine.surface();
        if let Some((width, height)) = surface.size() {
            self.camera.set_viewport(width, height);
        }

        self.build(engine)?;
        self.subscribe(engine);

        if let Some(player) = &self.player {
            let mut pointer = PointerMapper::new(surface, player.borrow().position_handle(), self.config.pointer);
            pointer.mount(&engine.window);
            self.pointer = Some(pointer);
        }

        log::info!(
            "Scene mounted: {} nodes, {} meteors, {} stars",
            self.graph.len(),
            self.meteors.borrow().len(),
            self.config.starfield.count
        );
        Ok(())
    }

    fn update(&mut self, _engine: &mut Engine, _tick: &FrameTick) -> Result<(), AppError> {
        self.sync()?;
        Ok(())
    }

    fn render(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let queue = self.graph.collect();
        match engine.render_frame(&self.camera, &self.lights, &queue) {
            Ok(stats) => {
                self.last_stats = Some(stats);
                Ok(())
            }
            Err(RenderError::SurfaceLost) => {
                log::debug!("Surface unavailable, frame skipped");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    fn handle_event(&mut self, engine: &mut Engine, event: &AppEvent) -> Result<(), AppError> {
        if let AppEvent::WindowResized { width, height } = *event {
            self.camera.set_viewport(width, height);
        }
        engine.handle_event(event);
        Ok(())
    }

    fn unmount(&mut self, _engine: &mut Engine) {
        self.subscriptions.clear();
        if let Some(mut pointer) = self.pointer.take() {
            pointer.unmount();
        }
        log::info!("Scene unmounted after {} meteor resets", self.meteors.borrow().total_resets());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded(orbit_controls: bool) -> StarfoxScene {
        let mut config = GameConfig::default();
        config.simulation.seed = Some(3);
        config.camera.orbit_controls = orbit_controls;
        StarfoxScene::new(config)
    }

    #[test]
    fn test_camera_and_lights() {
        let scene = seeded(false);
        assert_eq!(scene.camera().position, Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(scene.camera().fov, 40.0_f32.to_radians());
        assert_relative_eq!(scene.camera().far, 10000.0);

        let lights = scene.lights();
        assert_eq!(lights.len(), 2);
        assert!(lights.iter().all(|light| light.intensity == 0.5));
        assert_eq!(lights[0].position, Vec3::new(-1.0, 1.0, -1.0));
        assert_eq!(lights[1].position, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_orbit_disabled_by_default() {
        let mut scene = seeded(false);
        assert!(scene.orbit(1.0, 1.0).is_none());
        assert_eq!(scene.camera().position, Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_orbit_clamps_azimuth() {
        let mut scene = seeded(true);
        let (azimuth, polar, distance) = scene.orbit(PI, PI / 2.0).expect("orbit enabled");
        assert_relative_eq!(azimuth, QUARTER_PI);
        assert_relative_eq!(polar, PI / 2.0);
        assert_relative_eq!(distance, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_same_seed_same_meteors() {
        let a = seeded(false);
        let b = seeded(false);
        assert_eq!(a.meteors().units(), b.meteors().units());
    }
}
