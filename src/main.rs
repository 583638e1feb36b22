//! Physics Lab entry point
//!
//! Browser: wires buttons, sliders and HUD elements to a [`Lab`], drives it
//! from `requestAnimationFrame` and publishes each demo's snapshot on its
//! canvas as a `data-snapshot` attribute. Native: runs demos headless and logs
//! their final snapshots.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_lab {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, MouseEvent};

    use physics_lab::consts::SIM_DT;
    use physics_lab::sim::{FrameClock, Simulation};
    use physics_lab::settings::ParamRange;
    use physics_lab::settings::ranges::*;
    use physics_lab::{Demo, Lab, LabSettings};

    /// Browser-side owner: the lab plus frame timing and wall-clock stamps
    struct WebLab {
        lab: Lab,
        clock: FrameClock,
        /// `Date.now()` at the last collision launch from a fresh table
        launch_ms: Option<f64>,
        /// `Date.now()` at first contact
        contact_ms: Option<f64>,
    }

    impl WebLab {
        fn new(settings: &LabSettings) -> Self {
            Self {
                lab: Lab::new(settings),
                clock: FrameClock::new(),
                launch_ms: None,
                contact_ms: None,
            }
        }

        fn play(&mut self, demo: Demo) {
            let launching = !self.lab.is_running(demo);
            if launching && demo == Demo::Collision && self.lab.collision.is_pristine() {
                self.launch_ms = Some(js_sys::Date::now());
                self.contact_ms = None;
            }
            if !self.lab.any_running() {
                self.clock.resync();
            }
            self.lab.play(demo);
        }

        fn reset(&mut self, demo: Demo) {
            self.lab.reset(demo);
            if demo == Demo::Collision {
                self.launch_ms = None;
                self.contact_ms = None;
            }
        }

        fn frame(&mut self, time_ms: f64) {
            let ticks = self.clock.ticks_for_frame(time_ms);
            for _ in 0..ticks {
                self.lab.step(SIM_DT);
            }
            if self.lab.collision.has_collided && self.contact_ms.is_none() {
                self.contact_ms = Some(js_sys::Date::now());
            }
        }

        /// Seconds from launch to first contact
        fn contact_seconds(&self) -> Option<f64> {
            Some((self.contact_ms? - self.launch_ms?) / 1000.0)
        }
    }

    /// Slider element ids, their ranges and the setting each one drives
    fn slider_fields(settings: &mut LabSettings) -> [(&'static str, ParamRange, &mut f32); 16] {
        let LabSettings {
            collision,
            braking,
            elevator,
            rocket,
            bicycle,
        } = settings;
        [
            ("collision-mass-a", DISK_MASS, &mut collision.mass_a),
            ("collision-speed", LAUNCH_SPEED, &mut collision.launch_speed),
            ("collision-mass-b", DISK_MASS, &mut collision.mass_b),
            ("collision-restitution", RESTITUTION, &mut collision.restitution),
            ("braking-mass", CAR_MASS, &mut braking.mass_kg),
            ("braking-speed", CAR_SPEED_KMH, &mut braking.speed_kmh),
            ("braking-force", BRAKE_FORCE_KN, &mut braking.brake_force_kn),
            ("elevator-mass", PASSENGER_MASS, &mut elevator.mass_kg),
            ("elevator-accel", ELEVATOR_ACCEL, &mut elevator.acceleration),
            ("rocket-mass", ROCKET_MASS, &mut rocket.mass_kg),
            ("rocket-thrust", THRUST_KN, &mut rocket.thrust_kn),
            ("rocket-burn", BURN_RATE, &mut rocket.burn_rate),
            ("bicycle-mass", BICYCLE_MASS, &mut bicycle.mass_kg),
            ("bicycle-force", PEDAL_FORCE, &mut bicycle.pedal_force),
            ("bicycle-drag", DRAG_COEFFICIENT, &mut bicycle.drag_coefficient),
            ("bicycle-slope", SLOPE_PERCENT, &mut bicycle.slope_percent),
        ]
    }

    fn slider(document: &Document, id: &str) -> Option<HtmlInputElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    /// Push ranges and stored settings into the sliders so the page matches the lab
    fn write_sliders(document: &Document, settings: &LabSettings) {
        let mut settings = settings.clone();
        for (id, range, value) in slider_fields(&mut settings) {
            if let Some(input) = slider(document, id) {
                input.set_min(&range.min.to_string());
                input.set_max(&range.max.to_string());
                input.set_step(&range.step.to_string());
                input.set_value_as_number(f64::from(*value));
            }
        }
    }

    fn read_sliders(document: &Document, current: &LabSettings) -> LabSettings {
        let mut settings = current.clone();
        for (id, _, value) in slider_fields(&mut settings) {
            if let Some(input) = slider(document, id) {
                let v = input.value_as_number();
                if v.is_finite() {
                    *value = v as f32;
                }
            }
        }
        settings
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Expose each demo's snapshot as JSON on its canvas for the page's drawing code
    fn publish_snapshots(document: &Document, lab: &Lab) {
        for demo in Demo::ALL {
            let Some(canvas) = document.get_element_by_id(&format!("{demo}-canvas")) else {
                continue;
            };
            match lab.snapshot_json(demo) {
                Ok(json) => {
                    let _ = canvas.set_attribute("data-snapshot", &json);
                }
                Err(e) => log::warn!("Could not serialize {} snapshot: {}", demo, e),
            }
        }
    }

    /// Write every demo's numbers into the HUD
    fn update_hud(document: &Document, web: &WebLab) {
        let lab = &web.lab;

        let c = lab.collision.snapshot();
        set_text(document, "collision-velocity-a", &format!("{:.2} m/s", c.a.speed_mps));
        set_text(document, "collision-velocity-b", &format!("{:.2} m/s", c.b.speed_mps));
        set_text(document, "collision-momentum", &format!("{:.3} kg·m/s", c.total_momentum));
        set_text(document, "collision-energy", &format!("{:.3} J", c.initial_kinetic_energy));
        set_text(
            document,
            "collision-impact",
            &c.impact_force.map_or_else(|| "-".to_string(), |f| format!("{:.1} N", f)),
        );
        set_text(
            document,
            "collision-time",
            &web
                .contact_seconds()
                .map_or_else(|| "-".to_string(), |s| format!("{:.2} s", s)),
        );
        set_text(document, "collision-status", c.status.label());

        let b = lab.braking.snapshot();
        set_text(document, "braking-speed-value", &format!("{:.1} km/h", b.speed_kmh));
        set_text(document, "braking-distance", &format!("{:.1} m", b.distance));
        set_text(document, "braking-decel", &format!("{:.2} m/s²", b.plan.deceleration));
        set_text(
            document,
            "braking-stop-distance",
            &format!("{:.1} m", b.plan.stopping_distance),
        );
        set_text(document, "braking-stop-time", &format!("{:.2} s", b.plan.stopping_time));

        let e = lab.elevator.snapshot();
        set_text(document, "elevator-real-weight", &format!("{:.1} N", e.forces.real_weight));
        set_text(
            document,
            "elevator-apparent-weight",
            &format!("{:.1} N", e.forces.apparent_weight),
        );
        set_text(document, "elevator-tension", &format!("{:.1} N", e.forces.cable_tension));
        set_text(document, "elevator-sensation", e.forces.sensation.label());

        let r = lab.rocket.snapshot();
        set_text(document, "rocket-mass-value", &format!("{:.0} kg", r.mass));
        set_text(document, "rocket-accel", &format!("{:.2} m/s²", r.acceleration));
        set_text(document, "rocket-velocity", &format!("{:.1} m/s", r.velocity));
        set_text(document, "rocket-altitude", &format!("{:.0} m", r.altitude));

        let y = lab.bicycle.snapshot();
        set_text(document, "bicycle-net-force", &format!("{:.1} N", y.net_force));
        set_text(document, "bicycle-accel", &format!("{:.2} m/s²", y.acceleration));
        set_text(document, "bicycle-speed", &format!("{:.1} km/h", y.speed_kmh));
        set_text(document, "bicycle-distance", &format!("{:.1} m", y.distance));
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Physics Lab starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let settings = LabSettings::load();
        write_sliders(&document, &settings);
        let web = Rc::new(RefCell::new(WebLab::new(&settings)));

        for demo in Demo::ALL {
            setup_button(&document, &format!("{demo}-play"), web.clone(), move |w| {
                w.play(demo)
            })?;
            setup_button(&document, &format!("{demo}-reset"), web.clone(), move |w| {
                w.reset(demo)
            })?;
        }
        setup_sliders(&document, web.clone())?;

        request_animation_frame(web);

        log::info!("Physics Lab running");
        Ok(())
    }

    fn setup_button<F>(
        document: &Document,
        id: &str,
        web: Rc<RefCell<WebLab>>,
        mut on_click: F,
    ) -> Result<(), JsValue>
    where
        F: FnMut(&mut WebLab) + 'static,
    {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            on_click(&mut web.borrow_mut());
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_sliders(document: &Document, web: Rc<RefCell<WebLab>>) -> Result<(), JsValue> {
        let mut defaults = LabSettings::default();
        let ids: Vec<&'static str> = slider_fields(&mut defaults)
            .into_iter()
            .map(|(id, _, _)| id)
            .collect();

        for id in ids {
            let Some(input) = slider(document, id) else {
                continue;
            };
            let web = web.clone();
            let doc = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut w = web.borrow_mut();
                let settings = read_sliders(&doc, w.lab.settings());
                w.lab.apply_settings(&settings);
                w.lab.settings().save();
            });
            input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(web: Rc<RefCell<WebLab>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            lab_loop(web, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn lab_loop(web: Rc<RefCell<WebLab>>, time: f64) {
        {
            let mut w = web.borrow_mut();
            w.frame(time);
            if let Some(document) = web_sys::window().and_then(|win| win.document()) {
                update_hud(&document, &w);
                publish_snapshots(&document, &w.lab);
            }
        }

        request_animation_frame(web);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_lab::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::path::PathBuf;

    use clap::Parser;

    #[derive(Parser, Debug)]
    #[command(name = "physics-lab", about = "Run the physics lab demos headless")]
    pub struct Args {
        /// Settings JSON file; defaults are used when omitted
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Demo to run (collision, braking, elevator, rocket, bicycle) or "all"
        #[arg(short, long, default_value = "all")]
        pub demo: String,

        /// Tick cap per demo
        #[arg(long, default_value_t = 60 * 60)]
        pub max_ticks: u32,
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> physics_lab::Result<()> {
    use clap::Parser;
    use physics_lab::consts::SIM_DT;
    use physics_lab::sim::run_until_stopped;
    use physics_lab::{Demo, Lab, LabSettings};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();

    let settings = match &args.config {
        Some(path) => LabSettings::from_json_file(path)?,
        None => LabSettings::load(),
    };

    let demos: Vec<Demo> = if args.demo.eq_ignore_ascii_case("all") {
        Demo::ALL.to_vec()
    } else {
        vec![args.demo.parse()?]
    };

    let mut lab = Lab::new(&settings);
    for demo in demos {
        lab.start(demo);
        let summary = match demo {
            Demo::Collision => run_until_stopped(&mut lab.collision, SIM_DT, args.max_ticks),
            Demo::Braking => run_until_stopped(&mut lab.braking, SIM_DT, args.max_ticks),
            Demo::Elevator => run_until_stopped(&mut lab.elevator, SIM_DT, args.max_ticks),
            Demo::Rocket => run_until_stopped(&mut lab.rocket, SIM_DT, args.max_ticks),
            Demo::Bicycle => run_until_stopped(&mut lab.bicycle, SIM_DT, args.max_ticks),
        };

        if summary.stopped {
            log::info!("{} finished after {} ticks", demo, summary.ticks);
        } else {
            log::warn!("{} still running after {} ticks", demo, summary.ticks);
        }
        log::info!("{} final state: {}", demo, lab.snapshot_json(demo)?);
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
