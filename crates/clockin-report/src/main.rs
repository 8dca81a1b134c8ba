mod bootstrap;

use anyhow::{Context, Result};
use clockin_core::settings::Settings;
use clockin_core::time_utils::TimestampParser;
use clockin_data::aggregator::AttendanceAggregator;
use clockin_data::analysis::{build_report, ReportCache};
use clockin_data::observer::TracingObserver;
use clockin_data::reader::load_csv_file;
use clockin_ui::app::App;
use clockin_ui::report::render_text_report;

fn main() -> Result<()> {
    let settings = Settings::load()?;

    let log_target = bootstrap::log_target(settings.log_file.as_deref(), !settings.print);
    bootstrap::setup_logging(&settings.log_level, &log_target)?;

    tracing::info!("clockin-report v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "File: {}, Timezone: {}, Theme: {}, Flexible ids: {:?}",
        settings.file.display(),
        settings.timezone,
        settings.theme,
        settings.flexible_ids
    );

    let parser = TimestampParser::new(&settings.timezone);
    let events = match load_csv_file(&settings.file, &parser, &TracingObserver) {
        Ok(events) => events,
        Err(e) if e.is_parse_failure() => {
            tracing::error!("{e}");
            eprintln!("Could not parse file: {e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };

    let month = match settings.selected_month()? {
        Some(month) => month,
        None => AttendanceAggregator::default_month(&events)
            .context("no clock-in events to report on")?,
    };
    tracing::info!("Reporting on {month} ({} events loaded)", events.len());

    let policy = settings.punctuality_policy();

    if settings.print {
        let report = build_report(&events, month, &TracingObserver);
        print!("{}", render_text_report(&report, &events, &policy));
        return Ok(());
    }

    let app = App::new(
        &settings.theme,
        settings.timezone.clone(),
        policy,
        ReportCache::new(events),
        month,
        Box::new(TracingObserver),
    );
    app.run()?;

    Ok(())
}
