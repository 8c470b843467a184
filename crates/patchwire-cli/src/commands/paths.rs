//! Show config and rack locations.

use patchwire_config::{list_user_racks, rack_name_from_path, user_config_dir, user_racks_dir};
use std::path::Path;

pub fn run(settings_path: &Path) {
    println!("Config:   {}", user_config_dir().display());
    println!("Settings: {}", settings_path.display());
    println!("Racks:    {}", user_racks_dir().display());

    let racks = list_user_racks();
    if !racks.is_empty() {
        println!();
        for path in racks {
            if let Some(name) = rack_name_from_path(&path) {
                println!("  {name}");
            }
        }
    }
}
