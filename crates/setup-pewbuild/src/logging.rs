use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

const LOG_TARGETS: [&str; 2] = ["setup_pewbuild", "pewsetup"];

pub fn init_logging(debug_enabled: bool) {
    let mut builder = ConfigBuilder::new();
    builder.set_time_format_rfc3339();
    for target in LOG_TARGETS {
        builder.add_filter_allow_str(target);
    }
    let config = builder.build();

    let _ = TermLogger::init(
        LevelFilter::Debug,
        config,
        TerminalMode::Stdout,
        ColorChoice::Auto,
    );

    set_debug_logging(debug_enabled);
    log::debug!("Debug logging enabled");
}

pub fn set_debug_logging(enabled: bool) {
    log::set_max_level(level_for(enabled));
}

fn level_for(debug_enabled: bool) -> LevelFilter {
    if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
