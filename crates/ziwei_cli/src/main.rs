use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};
use ziwei_base::locale::transformation_name;
use ziwei_base::{Chart, Gender, Horoscope, Locale, PlacedStar};
use ziwei_rs::{LunarParams, SolarParams, ZiweiError};
use ziwei_time::{SolarTime, TableCalendar};

#[derive(Parser)]
#[command(name = "ziwei", about = "ZiWei Dou Shu chart CLI")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    /// Override a division option (year-division, month-division, day-division)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE")]
    overrides: Vec<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Subject {
    /// Gender: male or female
    #[arg(long, default_value = "male")]
    gender: Gender,
    /// Name printed on the chart
    #[arg(long, default_value = "")]
    name: String,
    /// Display locale: zh-CN or zh-Hant
    #[arg(long)]
    locale: Option<Locale>,
}

#[derive(Args)]
struct Birth {
    /// Lunar birth date as year-month-day-hourIndex
    #[arg(long, conflicts_with = "solar")]
    lunar: Option<String>,
    /// Solar birth time (YYYY-MM-DDTHH:MM)
    #[arg(long)]
    solar: Option<SolarTime>,
    /// Lunar calendar table file instead of the Chinese calendar
    #[arg(long)]
    calendar: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chart from a lunar date string
    Lunar {
        /// year-month-day-hourIndex, e.g. 2000-8-16-2; suffix the month
        /// with L for a leap month (2020-4L-3-5), hour index 12 is late Zi
        date: String,
        #[command(flatten)]
        subject: Subject,
        /// Lunar calendar table file instead of the Chinese calendar
        #[arg(long)]
        calendar: Option<PathBuf>,
    },
    /// Chart from a solar birth time
    Solar {
        /// Birth time (YYYY-MM-DDTHH:MM)
        time: SolarTime,
        #[command(flatten)]
        subject: Subject,
        /// Lunar calendar table file instead of the Chinese calendar
        #[arg(long)]
        calendar: Option<PathBuf>,
    },
    /// Major-period horoscope of a chart
    Horoscope {
        #[command(flatten)]
        birth: Birth,
        #[command(flatten)]
        subject: Subject,
        /// Nominal age
        #[arg(long, group = "anchor")]
        age: Option<i32>,
        /// Lunar year
        #[arg(long, group = "anchor")]
        year: Option<i32>,
        /// Palace index (0 = Yin .. 11 = Chou)
        #[arg(long, group = "anchor")]
        index: Option<u8>,
        /// Solar time to resolve the running period at
        #[arg(long, group = "anchor")]
        now: Option<SolarTime>,
    },
    /// Print the effective division options
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    apply_overrides(&cli.overrides);

    match cli.command {
        Commands::Lunar {
            date,
            subject,
            calendar,
        } => {
            let params = lunar_params(date, &subject);
            let chart = match calendar {
                Some(path) => ziwei_rs::by_lunar_with_calendar(&params, &load_calendar(&path)),
                None => ziwei_rs::by_lunar(&params),
            };
            emit_chart(&or_exit(chart), cli.json);
        }

        Commands::Solar {
            time,
            subject,
            calendar,
        } => {
            let params = solar_params(time, &subject);
            let chart = match calendar {
                Some(path) => ziwei_rs::by_solar_with_calendar(&params, &load_calendar(&path)),
                None => ziwei_rs::by_solar(&params),
            };
            emit_chart(&or_exit(chart), cli.json);
        }

        Commands::Horoscope {
            birth,
            subject,
            age,
            year,
            index,
            now,
        } => {
            let cal = birth.calendar.as_deref().map(load_calendar);
            let chart = match (birth.lunar, birth.solar, &cal) {
                (Some(date), _, Some(cal)) => {
                    ziwei_rs::by_lunar_with_calendar(&lunar_params(date, &subject), cal)
                }
                (Some(date), _, None) => ziwei_rs::by_lunar(&lunar_params(date, &subject)),
                (None, Some(time), Some(cal)) => {
                    ziwei_rs::by_solar_with_calendar(&solar_params(time, &subject), cal)
                }
                (None, Some(time), None) => ziwei_rs::by_solar(&solar_params(time, &subject)),
                (None, None, _) => {
                    eprintln!("Provide --lunar or --solar");
                    std::process::exit(1);
                }
            };
            let chart = or_exit(chart);
            let horoscope = match (age, year, index, now, &cal) {
                (Some(age), ..) => chart.horoscope_for_age(age),
                (_, Some(year), ..) => chart.horoscope_for_year(year),
                (_, _, Some(index), ..) => or_exit(chart.horoscope_at(index)),
                (_, _, _, Some(now), Some(cal)) => {
                    or_exit(ziwei_rs::current_horoscope_with_calendar(&chart, cal, &now))
                }
                (_, _, _, Some(now), None) => or_exit(ziwei_rs::current_horoscope(&chart, &now)),
                _ => {
                    eprintln!("Provide one of --age, --year, --index or --now");
                    std::process::exit(1);
                }
            };
            emit_horoscope(&horoscope, cli.json);
        }

        Commands::Config => {
            let settings = ziwei_rs::settings();
            if cli.json {
                print_json(&settings.config);
            } else {
                for (key, value) in settings.config.entries() {
                    println!("{key} = {value}");
                }
                println!("locale = {}", settings.locale);
            }
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn apply_overrides(raw: &[String]) {
    let mut pairs = Vec::with_capacity(raw.len());
    for item in raw {
        let Some((key, value)) = item.split_once('=') else {
            eprintln!("Invalid --set '{item}' (expected KEY=VALUE)");
            std::process::exit(1);
        };
        pairs.push((key.trim(), value.trim()));
    }
    let rejected = ziwei_rs::apply_overrides(&pairs);
    for (key, value) in rejected {
        eprintln!("Ignoring option {key}={value}");
    }
}

fn or_exit<T>(result: Result<T, impl Into<ZiweiError>>) -> T {
    result.map_err(Into::into).unwrap_or_else(|e: ZiweiError| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn load_calendar(path: &Path) -> TableCalendar {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read calendar {}: {e}", path.display());
        std::process::exit(1);
    });
    let cal: TableCalendar = text.parse().unwrap_or_else(|e| {
        eprintln!("Failed to parse calendar {}: {e}", path.display());
        std::process::exit(1);
    });
    debug!(years = cal.len(), path = %path.display(), "calendar loaded");
    cal
}

fn lunar_params(date: String, subject: &Subject) -> LunarParams {
    LunarParams {
        name: subject.name.clone(),
        gender: subject.gender,
        date,
        locale: subject.locale,
    }
}

fn solar_params(solar: SolarTime, subject: &Subject) -> SolarParams {
    SolarParams {
        name: subject.name.clone(),
        gender: subject.gender,
        solar,
        locale: subject.locale,
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("Failed to encode JSON: {e}");
            std::process::exit(1);
        }
    }
}

fn star_label(star: &PlacedStar, locale: Locale) -> String {
    match star.transformation {
        Some(t) => format!("{}({})", star.name, transformation_name(locale, t)),
        None => star.name.to_string(),
    }
}

fn emit_chart(chart: &Chart, json: bool) {
    if json {
        print_json(chart);
        return;
    }
    if !chart.name.is_empty() {
        println!("{}", chart.name);
    }
    println!("{}{} {}", chart.yin_yang_name, chart.gender_name, chart.zodiac);
    if let Some(solar) = &chart.solar_text {
        println!("{solar}");
    }
    println!("{}", chart.lunar_text);
    if let Some(eight) = &chart.sexagenary_text {
        println!("{eight}");
    }
    println!("{} ({})", chart.hour_name, chart.hour_range);
    println!("{}", chart.five_element_name);
    println!();

    let locale = chart.locale;
    for p in &chart.palaces {
        let majors: Vec<String> = p.major_stars.iter().map(|s| star_label(s, locale)).collect();
        let minors: Vec<String> = p.minor_stars.iter().map(|s| star_label(s, locale)).collect();
        println!(
            "{:>2} {}{} {:<4} {:>3}-{:<3} {} | {}{}",
            p.index,
            p.stem_name,
            p.branch_name,
            p.name,
            p.range.start,
            p.range.end,
            majors.join(" "),
            minors.join(" "),
            if p.is_origin { " *" } else { "" }
        );
    }
}

fn emit_horoscope(horoscope: &Horoscope, json: bool) {
    if json {
        print_json(horoscope);
        return;
    }
    println!(
        "period palace {} ({}-{})",
        horoscope.index, horoscope.range.start, horoscope.range.end
    );
    for p in &horoscope.palaces {
        match &p.text {
            Some(text) => println!("{:>2} {} {text}", p.index, p.name),
            None => println!("{:>2} {}", p.index, p.name),
        }
    }
}
