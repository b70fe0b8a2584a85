/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune.toml
    let config = rune_config::RuneConfig::load();
    let transition = &config.transition;

    println!("=== Replace Transition Configuration ===\n");

    println!("Transition Settings:");
    println!("  Name: {:?}", transition.transition_name);
    println!("  Height Class: {}", transition.transition_name.height_class());
    println!("  Appear: {} (timeout {:?})", transition.appear, transition.appear_timeout());
    println!("  Enter: {} (timeout {:?})", transition.enter, transition.enter_timeout());
    println!("  Leave: {} (timeout {:?})", transition.leave, transition.leave_timeout());
    println!("  Clip Overflow: {}", transition.clip_overflow);
    println!("  Track Width: {}", transition.track_width);
    println!("  Notify Leaving: {}", transition.notify_leaving);
    for stage in transition.missing_timeouts() {
        println!("  Warning: {stage} transition has no timeout");
    }
    println!();

    println!("Demo Settings:");
    println!("  Scenario: {:?}", config.demo.scenario);
    println!("  Log Events: {}", config.demo.log_events);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
