use tracing::{debug, info};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::consts::ADDRESS_NOT_FOUND;
use crate::core::{
    DateFilter, DefaultLabels, Distribution, LocationNames, Report, ReportQuery,
    aggregate_by_category, aggregate_by_location, aggregate_by_status, aggregate_daily,
    aggregate_monthly_by_category, find_report,
};
use crate::error::AppError;
use crate::output::{
    ChartKind, ChartRegistry, Palette, SummaryCounts, TableOptions, build_daily_table,
    build_distribution_table, build_monthly_table, build_report_detail, build_reports_table,
    chart_json, daily_chart, daily_csv, dashboard_json, distribution_chart, distribution_csv, monthly_chart, monthly_csv,
    print_summary_line, print_titled, register_chart_types, report_detail_json, reports_csv,
    reports_json,
};
use crate::source::{LoadResult, load_reports, reverse_geocode, select_source, set_status};
use crate::utils::{Timezone, parse_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else if cli.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Table
        }
    }
}

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) format: OutputFormat,
    pub(crate) labels: &'a DefaultLabels,
    pub(crate) locations: &'a LocationNames,
    pub(crate) palette: Palette,
    pub(crate) timezone: Timezone,
    pub(crate) charts: &'static ChartRegistry,
}

impl CommandContext<'_> {
    fn table_options(&self) -> TableOptions {
        TableOptions {
            order: self.cli.order,
            use_color: self.cli.use_color(),
        }
    }

    fn summary(&self, load: &LoadResult, skipped: usize) {
        if self.format == OutputFormat::Table && !self.cli.quiet {
            let counts = SummaryCounts {
                reports: load.reports.len(),
                skipped,
                duplicates: load.duplicates,
                filtered_out: load.filtered_out,
            };
            print_summary_line(&counts, Some(load.elapsed_ms), self.cli.use_color());
        }
    }
}

struct DistributionView {
    title: &'static str,
    key_header: &'static str,
    kind: ChartKind,
}

const CATEGORY_VIEW: DistributionView = DistributionView {
    title: "Reports by Category",
    key_header: "Category",
    kind: ChartKind::Pie,
};

const STATUS_VIEW: DistributionView = DistributionView {
    title: "Reports by Status",
    key_header: "Status",
    kind: ChartKind::Pie,
};

const LOCATION_VIEW: DistributionView = DistributionView {
    title: "Reports by Location",
    key_header: "Location",
    kind: ChartKind::Bar,
};

fn handle_distribution(
    ctx: &CommandContext<'_>,
    load: &LoadResult,
    view: &DistributionView,
    distribution: &Distribution,
) -> Result<(), AppError> {
    match ctx.format {
        OutputFormat::Json => {
            let chart = distribution_chart(ctx.charts, view.kind, distribution, &ctx.palette)?;
            println!("{}", chart_json(&chart)?);
        }
        OutputFormat::Csv => print!("{}", distribution_csv(view.key_header, distribution)),
        OutputFormat::Table => {
            print_titled(
                view.title,
                &build_distribution_table(view.key_header, distribution, &ctx.table_options()),
            );
            ctx.summary(load, 0);
        }
    }
    Ok(())
}

fn handle_daily(ctx: &CommandContext<'_>, load: &LoadResult) -> Result<(), AppError> {
    let series = aggregate_daily(&load.reports);
    match ctx.format {
        OutputFormat::Json => println!("{}", chart_json(&daily_chart(ctx.charts, &series)?)?),
        OutputFormat::Csv => print!("{}", daily_csv(&series, ctx.cli.order)),
        OutputFormat::Table => {
            print_titled(
                "Reports Over Time (Daily, UTC)",
                &build_daily_table(&series, &ctx.table_options()),
            );
            ctx.summary(load, series.skipped);
        }
    }
    Ok(())
}

fn handle_monthly(ctx: &CommandContext<'_>, load: &LoadResult) -> Result<(), AppError> {
    let monthly = aggregate_monthly_by_category(&load.reports, ctx.labels, ctx.timezone);
    match ctx.format {
        OutputFormat::Json => println!("{}", chart_json(&monthly_chart(ctx.charts, &monthly)?)?),
        OutputFormat::Csv => print!("{}", monthly_csv(&monthly, ctx.cli.order)),
        OutputFormat::Table => {
            print_titled(
                "Category Count Per Month",
                &build_monthly_table(&monthly, &ctx.table_options()),
            );
            ctx.summary(load, monthly.skipped);
        }
    }
    Ok(())
}

fn handle_dashboard(ctx: &CommandContext<'_>, load: &LoadResult) -> Result<(), AppError> {
    let by_category = aggregate_by_category(&load.reports, ctx.labels);
    let daily = aggregate_daily(&load.reports);
    let by_status = aggregate_by_status(&load.reports, ctx.labels);

    match ctx.format {
        OutputFormat::Json => {
            let category = distribution_chart(ctx.charts, ChartKind::Pie, &by_category, &ctx.palette)?;
            let daily = daily_chart(ctx.charts, &daily)?;
            let status = distribution_chart(ctx.charts, ChartKind::Pie, &by_status, &ctx.palette)?;
            println!("{}", dashboard_json(&category, &daily, &status)?);
        }
        OutputFormat::Csv => {
            print!("{}", distribution_csv(CATEGORY_VIEW.key_header, &by_category));
            println!();
            print!("{}", daily_csv(&daily, ctx.cli.order));
            println!();
            print!("{}", distribution_csv(STATUS_VIEW.key_header, &by_status));
        }
        OutputFormat::Table => {
            let opts = ctx.table_options();
            print_titled(
                CATEGORY_VIEW.title,
                &build_distribution_table(CATEGORY_VIEW.key_header, &by_category, &opts),
            );
            print_titled("Reports Over Time (Daily, UTC)", &build_daily_table(&daily, &opts));
            print_titled(
                STATUS_VIEW.title,
                &build_distribution_table(STATUS_VIEW.key_header, &by_status, &opts),
            );
            ctx.summary(load, daily.skipped);
        }
    }
    Ok(())
}

fn handle_reports(ctx: &CommandContext<'_>, load: &LoadResult, query: &ReportQuery) -> Result<(), AppError> {
    let rows: Vec<&Report> = query.apply(&load.reports, ctx.labels);
    debug!("{} of {} reports match the query", rows.len(), load.reports.len());
    match ctx.format {
        OutputFormat::Json => println!("{}", reports_json(&rows, ctx.labels)?),
        OutputFormat::Csv => print!("{}", reports_csv(&rows, ctx.labels)),
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("No reports match the query.");
                return Ok(());
            }
            print_titled("Reports", &build_reports_table(&rows, ctx.labels, &ctx.table_options()));
        }
    }
    Ok(())
}

fn handle_show(ctx: &CommandContext<'_>, load: &LoadResult, id: &str, address: bool) -> Result<(), AppError> {
    let report = find_report(&load.reports, id).ok_or_else(|| AppError::ReportNotFound {
        id: id.to_string(),
    })?;

    let resolved = address.then(|| match &report.location {
        Some(location) => reverse_geocode(location),
        None => ADDRESS_NOT_FOUND.to_string(),
    });

    match ctx.format {
        OutputFormat::Json => {
            println!("{}", report_detail_json(report, ctx.labels, resolved.as_deref())?);
        }
        OutputFormat::Csv => print!("{}", reports_csv(&[report], ctx.labels)),
        OutputFormat::Table => println!(
            "{}",
            build_report_detail(report, ctx.labels, resolved.as_deref(), ctx.cli.use_color())
        ),
    }
    Ok(())
}

fn handle_set_status(cli: &Cli, id: &str, status: &str) -> Result<(), AppError> {
    let server = cli.server.as_deref().ok_or(AppError::MissingServer)?;
    set_status(server, id, status)?;
    info!("Report {id} status set to {status}");
    if !cli.quiet {
        println!("Report {id} status set to \"{status}\".");
    }
    Ok(())
}

/// Run one command: fetch the collection once, aggregate, render
pub(crate) fn run(cli: &Cli, config: &Config) -> Result<(), AppError> {
    let command = cli.command.clone().unwrap_or_default();
    if command.is_remote_only()
        && let Commands::SetStatus { id, status } = &command
    {
        return handle_set_status(cli, id, status);
    }

    let since = cli.since.as_deref().map(parse_date).transpose()?;
    let until = cli.until.as_deref().map(parse_date).transpose()?;
    let filter = DateFilter::new(since, until);
    let timezone = Timezone::parse(cli.timezone.as_deref())?;

    let source = select_source(cli.input.as_deref(), cli.server.as_deref())?;
    let load = load_reports(source.as_ref(), &filter)?;

    let ctx = CommandContext {
        cli,
        format: OutputFormat::from_cli(cli),
        labels: &config.labels,
        locations: &config.locations,
        palette: Palette::new(config.palette.clone()),
        timezone,
        charts: register_chart_types(),
    };

    if load.reports.is_empty() && ctx.format == OutputFormat::Table && command.is_aggregate_view()
    {
        println!("No reports found.");
        return Ok(());
    }

    match &command {
        Commands::Category => {
            let distribution = aggregate_by_category(&load.reports, ctx.labels);
            handle_distribution(&ctx, &load, &CATEGORY_VIEW, &distribution)
        }
        Commands::Status => {
            let distribution = aggregate_by_status(&load.reports, ctx.labels);
            handle_distribution(&ctx, &load, &STATUS_VIEW, &distribution)
        }
        Commands::Location => {
            let distribution = aggregate_by_location(&load.reports, ctx.labels, ctx.locations);
            handle_distribution(&ctx, &load, &LOCATION_VIEW, &distribution)
        }
        Commands::Daily => handle_daily(&ctx, &load),
        Commands::Monthly => handle_monthly(&ctx, &load),
        Commands::Dashboard => handle_dashboard(&ctx, &load),
        Commands::Reports {
            filter,
            status,
            sort,
        } => {
            let query = ReportQuery {
                text: filter.clone(),
                status: status.clone(),
                sort: *sort,
            };
            handle_reports(&ctx, &load, &query)
        }
        Commands::Show { id, address } => handle_show(&ctx, &load, id, *address),
        Commands::SetStatus { id, status } => handle_set_status(cli, id, status),
    }
}
