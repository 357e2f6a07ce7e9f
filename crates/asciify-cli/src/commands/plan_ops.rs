use std::fs;

use asciify_core::plan::{self, Step};

pub fn plan_export() {
    print!("{}", plan::default_toml());
}

pub fn plan_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let plan = die!(plan::parse_plan_toml(&content), "Error: {}");
    let kinds: Vec<&str> = plan.steps.iter().map(Step::name).collect();
    println!("OK: {} steps ({})", plan.steps.len(), kinds.join(", "));
    if plan.needs_properties() {
        println!("note: this plan needs --ucd to build");
    }
}
