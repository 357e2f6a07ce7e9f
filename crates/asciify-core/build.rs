fn main() {
    // Validate the embedded plan at compile time.
    validate_toml(
        "src/default_plan.toml",
        include_str!("src/default_plan.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    if content.parse::<toml::Table>().is_err() {
        panic!("{path} contains invalid TOML");
    }
}
