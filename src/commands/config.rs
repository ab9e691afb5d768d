use anyhow::{Result, bail};
use appointments_core::{AppointmentClient, AppointmentsConfig, PAGE_SIZE_OPTIONS};
use owo_colors::OwoColorize;

pub fn run(
    mut config: AppointmentsConfig,
    set_base_url: Option<String>,
    set_page_size: Option<usize>,
) -> Result<()> {
    let config_path = AppointmentsConfig::config_path()?;

    if set_base_url.is_some() || set_page_size.is_some() {
        let mut stored = AppointmentsConfig::load_from(&config_path)?;

        if let Some(base_url) = set_base_url {
            // Same checks the client applies
            AppointmentClient::new(&base_url)?;
            stored.base_url = base_url.clone();
            config.base_url = base_url;
        }
        if let Some(page_size) = set_page_size {
            if !PAGE_SIZE_OPTIONS.contains(&page_size) {
                bail!("Page size must be one of {:?}", PAGE_SIZE_OPTIONS);
            }
            stored.page_size = page_size;
            config.page_size = page_size;
        }

        stored.save()?;
        println!("{}", "Configuration saved".green());
        println!();
    }

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Base URL:   {}", config.base_url);
    println!(
        "  Resource:   {}/appointments",
        config.base_url.trim_end_matches('/')
    );
    println!("  Page size:  {}", config.page_size);

    Ok(())
}
