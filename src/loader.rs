use bus::{Bus, BusReader};
use three_d::*;

use crate::error::{HeroError, Result};
use crate::scene::ModelNode;
use crate::utils::*;
use crate::{log, log_error}; // macro import


pub type LoadResult = std::result::Result<CpuModel, String>;


/// Fetches and parses the model
pub async fn load_model(url: &str) -> Result<CpuModel> {
    let start = get_time_milliseconds();
    let asset_error = |e: three_d_asset::Error| HeroError::AssetLoad {
        url: url.to_string(),
        reason: e.to_string(),
    };

    let mut loaded = three_d_asset::io::load_async(&[url]).await.map_err(asset_error)?;
    let model: CpuModel = loaded.deserialize(url).map_err(asset_error)?;

    log!(
        "loader::load_model(): {} loaded in {:.1} ms, {} geometries",
        url,
        get_time_milliseconds() - start,
        model.geometries.len()
    );
    Ok(model)
}


/// Starts the load; the result arrives on the returned reader exactly once
pub fn spawn_load(url: String) -> BusReader<LoadResult> {
    let mut bus = Bus::<LoadResult>::new(1);
    let rx = bus.add_rx();

    execute_future(async move {
        let result = load_model(&url).await.map_err(|e| {
            log_error!("loader::spawn_load(): {}", e);
            e.to_string()
        });
        //////////////////////////////////
        // non-blocking (i.e., no atomic.wait)
        if bus.try_broadcast(result).is_err() {
            log_error!("loader::spawn_load(): render loop is gone");
        }
        //////////////////////////////////
    });

    rx
}


/// Uploads the primary instance and its independent clone from one CPU model
pub fn instantiate(context: &Context, cpu_model: &CpuModel) -> Result<(ModelNode, ModelNode)> {
    let upload = || {
        Model::<PhysicalMaterial>::new(context, cpu_model)
            .map(ModelNode::new)
            .map_err(|e| HeroError::AssetLoad {
                url: cpu_model.name.clone(),
                reason: e.to_string(),
            })
    };
    Ok((upload()?, upload()?))
}
