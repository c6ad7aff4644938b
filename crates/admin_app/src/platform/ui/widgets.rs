use admin_core::{
    DatePickerBinder, DatePickerConfig, DropdownBinder, DropdownConfig, FieldElement,
};
use admin_logging::admin_info;

/// Console stand-in for the dropdown library: announces each binding.
pub struct ConsoleDropdowns;

impl DropdownBinder for ConsoleDropdowns {
    fn bind(&mut self, field: &FieldElement, config: &DropdownConfig) {
        let mut traits = vec![format!("theme={}", config.theme)];
        if config.tags {
            traits.push("tags".to_string());
        }
        if let Some(remote) = &config.remote {
            traits.push(format!("remote={} min={}", remote.url, remote.min_input_len));
        }
        if !config.seeds.is_empty() {
            let seeds: Vec<&str> = config.seeds.iter().map(|s| s.text.as_str()).collect();
            traits.push(format!("selected={}", seeds.join("|")));
        }
        admin_info!("Dropdown bound to {}: {}", field.name, traits.join(" "));
        println!("widget {}: dropdown {}", field.name, traits.join(" "));
    }
}

pub struct ConsoleDatePickers;

impl DatePickerBinder for ConsoleDatePickers {
    fn bind(&mut self, field: &FieldElement, config: &DatePickerConfig) {
        let clock = if config.time_24hr { " 24h" } else { "" };
        admin_info!("Date picker bound to {}: {}", field.name, config.date_format);
        println!("widget {}: date picker {}{}", field.name, config.date_format, clock);
    }
}
