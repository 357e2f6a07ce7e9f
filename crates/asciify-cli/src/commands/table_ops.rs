use std::path::Path;
use std::process;

use asciify_core::codepoint::CodePoint;
use asciify_core::table::load_table;
use asciify_core::{transliterate, transliterate_any};

pub fn apply(table_file: &str, text: &str, strict: bool) {
    let table = die!(
        load_table(Path::new(table_file)),
        "Error reading {table_file}: {}"
    );

    if !strict {
        println!("{}", transliterate_any(&table, text));
        return;
    }

    match transliterate(&table, text) {
        Some(out) => println!("{out}"),
        None => {
            let missing: Vec<String> = text
                .chars()
                .map(CodePoint::from)
                .filter(|&cp| !table.contains(cp))
                .map(|cp| cp.to_string())
                .collect();
            eprintln!("Error: no entry for {}", missing.join(", "));
            process::exit(1);
        }
    }
}

pub fn check(table_file: &str) {
    let table = die!(
        load_table(Path::new(table_file)),
        "Error reading {table_file}: {}"
    );
    die!(table.verify_printable(), "Error: {}");
    let ascii = table.iter().filter(|(cp, _)| cp.is_printable_ascii()).count();
    println!(
        "OK: {} entries ({} printable ASCII, {} other)",
        table.len(),
        ascii,
        table.len() - ascii
    );
}
