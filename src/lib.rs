use wasm_bindgen::prelude::*;

mod utils;
mod error;
mod config;
mod state;
mod layout;
mod placement;
mod timeline;
mod entrance;
mod throttle;
mod dom;
mod frame;
mod scene;
mod loader;
mod renderer;

pub use config::HeroConfig;
pub use error::HeroError;


#[wasm_bindgen(start)]
pub fn start() {
    utils::set_panic_hook();
}


/// Starts the hero scene with the default asset
#[wasm_bindgen]
pub async fn run() -> Result<(), JsValue> {
    launch(HeroConfig::default()).await
}


/// Starts the hero scene with a different glTF asset
#[wasm_bindgen]
pub async fn run_with_asset(asset_url: String) -> Result<(), JsValue> {
    launch(HeroConfig::default().with_asset_url(asset_url)).await
}


async fn launch(config: HeroConfig) -> Result<(), JsValue> {
    renderer::main(config).await.map_err(|e| {
        log_error!("run(): {}", e);
        JsValue::from(e)
    })
}
