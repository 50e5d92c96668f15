use crate::app::{App, AppResult};
use crate::atom::model::{ModelVariant, ViewToggle};
use crate::ui::ViewUpdate;

fn parse_model(value: &str) -> AppResult<ModelVariant> {
    Ok(value.parse::<ModelVariant>()?)
}

/// 모델을 고르고 요소를 선택한 뒤 지정된 시간만큼 진행
fn prepare_atom(app: &mut App, model: ModelVariant, symbol: &str, tilted: bool, time: f32) -> AppResult<()> {
    if crate::physics::elements::Element::by_symbol(symbol).is_none() {
        return Err(format!("unknown element symbol '{symbol}'").into());
    }
    app.select_element(model, symbol);
    app.update_view(model, ViewUpdate::set(ViewToggle::TiltedOrbits, tilted));
    app.tick(time);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use super::*;
    use crate::assembly::materials::PcfOverlayMode;
    use crate::ui::AssemblyViewUpdate;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse_overlay(value: &str) -> Result<PcfOverlayMode, String> {
        serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
            .map_err(|_| format!("expected none, total, material, manufacturing or transport, got '{value}'"))
    }

    #[derive(Parser, Debug)]
    #[command(version, about, long_about = None)]
    struct CliArgs {
        /// Element symbol to lay out.
        #[arg(short, long, default_value = "H")]
        element: String,

        /// Atom model: bohr, dalton, thomson or rutherford.
        #[arg(short, long, default_value = "bohr")]
        model: String,

        /// Seconds of motion to simulate before the snapshot.
        #[arg(long, default_value_t = 0.0)]
        time: f32,

        /// Tilt the Bohr shell rings.
        #[arg(long, default_value_t = false)]
        tilted: bool,

        /// Scene tree JSON of a motor assembly; switches to the assembly report.
        #[arg(long, requires = "catalog")]
        scene: Option<PathBuf>,

        /// Parts catalog JSON matching the scene.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Explode slider position in [0, 1].
        #[arg(long, default_value_t = 0.0)]
        explode: f32,

        /// Carbon footprint overlay.
        #[arg(long, value_parser = parse_overlay, default_value = "none")]
        overlay: PcfOverlayMode,

        /// Pretty-print the JSON output.
        #[arg(long, default_value_t = false)]
        pretty: bool,
    }

    fn run(args: CliArgs) -> AppResult<String> {
        let mut app = App::new();

        if let (Some(scene), Some(catalog)) = (&args.scene, &args.catalog) {
            let scene_json = std::fs::read_to_string(scene)?;
            let catalog_json = std::fs::read_to_string(catalog)?;
            app.load_assembly_json(&scene_json, &catalog_json)?;
            app.update_assembly_view(AssemblyViewUpdate {
                explode: Some(args.explode),
                pcf_overlay_mode: Some(args.overlay),
                ..Default::default()
            });
            let summary = app
                .assembly()
                .map(|scene| scene.summary())
                .ok_or("assembly failed to load")?;
            return to_json(&summary, args.pretty);
        }

        let model = parse_model(&args.model)?;
        prepare_atom(&mut app, model, &args.element, args.tilted, args.time)?;
        to_json(&app.report(model), args.pretty)
    }

    fn to_json(value: &impl serde::Serialize, pretty: bool) -> AppResult<String> {
        Ok(if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        })
    }

    /// 네이티브 플랫폼 시작 함수
    pub fn start() {
        env_logger::init();

        match run(CliArgs::parse()) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("{e}");
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::start;

// wasm32 타겟에서 필요한 import들
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    // 핫 리로드 시 로거가 이미 설정되어 있을 수 있음
    let _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("atom explorer ready");
}

#[cfg(target_arch = "wasm32")]
fn js_error(error: impl std::fmt::Display) -> JsError {
    JsError::new(&error.to_string())
}

/// JS 쪽에서 사용하는 진입점. 상태 스냅샷은 JSON 문자열로 주고받음
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct AtomExplorer {
    app: App,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl AtomExplorer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> AtomExplorer {
        AtomExplorer { app: App::new() }
    }

    #[wasm_bindgen(js_name = selectElement)]
    pub fn select_element(&mut self, model: &str, symbol: &str) -> Result<(), JsError> {
        let model = parse_model(model).map_err(js_error)?;
        self.app.select_element(model, symbol);
        Ok(())
    }

    #[wasm_bindgen(js_name = updateView)]
    pub fn update_view(&mut self, model: &str, patch: &str) -> Result<(), JsError> {
        let model = parse_model(model).map_err(js_error)?;
        let update: ViewUpdate = serde_json::from_str(patch).map_err(js_error)?;
        self.app.update_view(model, update);
        Ok(())
    }

    pub fn reset(&mut self, model: &str) -> Result<(), JsError> {
        let model = parse_model(model).map_err(js_error)?;
        self.app.reset(model);
        Ok(())
    }

    pub fn tick(&mut self, delta: f32) {
        self.app.tick(delta);
    }

    pub fn snapshot(&self, model: &str) -> Result<String, JsError> {
        let model = parse_model(model).map_err(js_error)?;
        serde_json::to_string(&self.app.report(model)).map_err(js_error)
    }

    /// Instance data for the particle pass, 8 floats per particle.
    #[wasm_bindgen(js_name = particleBuffer)]
    pub fn particle_buffer(&self, model: &str) -> Result<Vec<f32>, JsError> {
        let model = parse_model(model).map_err(js_error)?;
        let frame = self.app.frame(model);
        Ok(bytemuck::cast_slice::<_, f32>(&frame.particles).to_vec())
    }

    #[wasm_bindgen(js_name = loadAssembly)]
    pub fn load_assembly(&mut self, scene: &str, catalog: &str) -> Result<String, JsError> {
        let summary = self.app.load_assembly_json(scene, catalog).map_err(js_error)?;
        serde_json::to_string(&summary).map_err(js_error)
    }

    #[wasm_bindgen(js_name = updateAssemblyView)]
    pub fn update_assembly_view(&mut self, patch: &str) -> Result<(), JsError> {
        let update = serde_json::from_str(patch).map_err(js_error)?;
        self.app.update_assembly_view(update);
        Ok(())
    }

    #[wasm_bindgen(js_name = resetAssembly)]
    pub fn reset_assembly(&mut self) {
        self.app.reset_assembly();
    }
}
