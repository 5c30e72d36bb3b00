use cabinet_configurator::{config::ConfiguratorConfig, run_configurator};

fn main() -> anyhow::Result<()> {
    let config = ConfiguratorConfig::load()?;
    run_configurator(config)
}
