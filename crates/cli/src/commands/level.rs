use stardata_config::StoreConfiguration;

pub fn execute(config: &StoreConfiguration) -> eyre::Result<()> {
    println!("{} ({})", config.store.compression_level, config.level_source);
    Ok(())
}
