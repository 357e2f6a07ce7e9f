use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use asciify_core::pipeline::{run_plan, DirLoader};
use asciify_core::plan::{self, BuildPlan};
use asciify_core::table::{save_table, write_table};
use asciify_core::ucd::UnicodeData;

fn read_plan(plan_file: Option<&str>) -> (BuildPlan, PathBuf) {
    let Some(file) = plan_file else {
        eprintln!("Plan: built-in default");
        let plan = die!(plan::parse_plan_toml(plan::default_toml()), "Error: {}");
        return (plan, PathBuf::from("."));
    };

    eprintln!("Plan: {file}");
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let plan = die!(plan::parse_plan_toml(&content), "Error in {file}: {}");
    let root = Path::new(file)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    (plan, root)
}

/// Build a table from a plan and write it to `output_file` (`-` for stdout).
pub fn build(plan_file: Option<&str>, ucd_file: Option<&str>, output_file: &str) {
    let (plan, root) = read_plan(plan_file);

    let ucd = match ucd_file {
        Some(file) => {
            let ucd = die!(
                UnicodeData::load(Path::new(file)),
                "Error reading {file}: {}"
            );
            eprintln!("UnicodeData: {} characters", ucd.len());
            ucd
        }
        None if plan.needs_properties() => {
            eprintln!("Error: this plan needs character properties; pass --ucd <UnicodeData.txt>");
            process::exit(1);
        }
        None => UnicodeData::default(),
    };

    eprintln!("Running {} steps...", plan.steps.len());
    let loader = DirLoader::new(root);
    let (table, report) = die!(run_plan(&plan, &ucd, &loader), "Error: {}");
    eprintln!(
        "Closed {} entries in {} passes ({} rewrites)",
        table.len(),
        report.passes,
        report.rewritten
    );

    if output_file == "-" {
        die!(write_table(&table, io::stdout().lock()), "Error writing table: {}");
    } else {
        die!(
            save_table(&table, Path::new(output_file)),
            "Error writing {output_file}: {}"
        );
        eprintln!("Wrote {output_file}");
    }
}
