use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use geobin::{Database, Fields};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "geobin")]
#[command(about = "IP geolocation lookups from BIN databases", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up one or more IP addresses
    Query {
        /// Path to the BIN database file
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// IPv4 or IPv6 addresses to look up
        #[arg(value_name = "IP", required = true)]
        ips: Vec<String>,

        /// Comma-separated field names (e.g. "country_short,city"), default all
        #[arg(short, long)]
        fields: Option<String>,

        /// Output records as JSON
        #[arg(short, long)]
        json: bool,

        /// Buffer the whole database in memory instead of memory-mapping it
        #[arg(long)]
        in_memory: bool,
    },

    /// Show database metadata
    Inspect {
        /// Path to the BIN database file
        #[arg(value_name = "DATABASE")]
        database: PathBuf,

        /// Output metadata as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            database,
            ips,
            fields,
            json,
            in_memory,
        } => cmd_query(database, ips, fields, json, in_memory),
        Commands::Inspect { database, json } => cmd_inspect(database, json),
    }
}

fn parse_fields(spec: Option<&str>) -> Result<Fields> {
    let Some(spec) = spec else {
        return Ok(Fields::ALL);
    };
    let mut fields = Fields::empty();
    for name in spec.split(',') {
        fields |= match name.trim() {
            "all" => Fields::ALL,
            "country_short" => Fields::COUNTRY_SHORT,
            "country_long" => Fields::COUNTRY_LONG,
            "region" => Fields::REGION,
            "city" => Fields::CITY,
            "isp" => Fields::ISP,
            "latitude" => Fields::LATITUDE,
            "longitude" => Fields::LONGITUDE,
            "domain" => Fields::DOMAIN,
            "zip_code" => Fields::ZIP_CODE,
            "timezone" => Fields::TIMEZONE,
            "net_speed" => Fields::NET_SPEED,
            "idd_code" => Fields::IDD_CODE,
            "area_code" => Fields::AREA_CODE,
            "weather_station_code" => Fields::WEATHER_STATION_CODE,
            "weather_station_name" => Fields::WEATHER_STATION_NAME,
            "mcc" => Fields::MCC,
            "mnc" => Fields::MNC,
            "mobile_brand" => Fields::MOBILE_BRAND,
            "elevation" => Fields::ELEVATION,
            "usage_type" => Fields::USAGE_TYPE,
            other => bail!("unknown field name: {}", other),
        };
    }
    Ok(fields)
}

fn open_database(path: &PathBuf, in_memory: bool) -> Result<Database> {
    let db = if in_memory {
        Database::open_in_memory(path)
    } else {
        Database::open(path)
    };
    db.with_context(|| format!("Failed to load database: {}", path.display()))
}

fn cmd_query(
    database: PathBuf,
    ips: Vec<String>,
    fields: Option<String>,
    json: bool,
    in_memory: bool,
) -> Result<()> {
    let fields = parse_fields(fields.as_deref())?;
    let db = open_database(&database, in_memory)?;

    let mut records = Vec::new();
    for ip in &ips {
        let rec = db
            .query(ip, fields)
            .with_context(|| format!("Query failed for: {}", ip))?;
        if json {
            records.push(json!({ "ip": ip, "record": rec }));
        } else {
            println!("ip: {}", ip);
            println!("{}", rec);
            println!();
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    }
    Ok(())
}

fn cmd_inspect(database: PathBuf, json_output: bool) -> Result<()> {
    let db = open_database(&database, false)?;
    let header = db.header();

    if json_output {
        let output = json!({
            "file": database.display().to_string(),
            "product_type": header.product_type,
            "column_count": header.column_count,
            "build_date": format!("20{:02}-{:02}-{:02}", header.year, header.month, header.day),
            "ipv4_rows": header.v4_count,
            "ipv6_rows": header.v6_count,
            "ipv4_indexed": header.v4_index_addr != 0,
            "ipv6_indexed": header.v6_index_addr != 0,
            "api_version": geobin::api_version(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Database:     {}", database.display());
        println!("Product type: DB{}", header.product_type);
        println!("Columns:      {}", header.column_count);
        println!(
            "Build date:   20{:02}-{:02}-{:02}",
            header.year, header.month, header.day
        );
        println!("IPv4 rows:    {}", header.v4_count);
        println!("IPv6 rows:    {}", header.v6_count);
        println!(
            "IPv4 index:   {}",
            if header.v4_index_addr != 0 { "yes" } else { "no" }
        );
        println!(
            "IPv6 index:   {}",
            if header.v6_index_addr != 0 { "yes" } else { "no" }
        );
    }
    Ok(())
}
