use std::str::FromStr;

use optspec::{custom, custom_list, value, Options};

#[derive(Debug, Default)]
enum Level {
    #[default]
    Info,
    Debug,
    Trace,
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(format!("unknown level '{s}'")),
        }
    }
}

#[derive(Debug, Default)]
struct Range {
    low: u16,
    high: u16,
}

fn main() {
    let mut options = Options::new("custom");
    options
        .register_type::<Level>()
        .register_converter(|text: &str| {
            let (low, high) = text.split_once("..")?;
            Some(Range {
                low: low.parse().ok()?,
                high: high.parse().ok()?,
            })
        });
    options
        .add_options("Custom")
        .option("l,level", "The log level.", custom::<Level>().default_value("info"))
        .expect("Invalid option declaration")
        .option(
            "r,range",
            "Port ranges, like 80..90;8000..8080.",
            custom_list::<Range>().delimiter(';'),
        )
        .expect("Invalid option declaration")
        .option("tags", "Tags for each run.", value::<Vec<Vec<String>>>())
        .expect("Invalid option declaration");

    let result = options.parse().expect("Parse error");
    let option = result.get("level").expect("level is declared");
    println!("level: {:?}", option.as_custom::<Level>().expect("level has a default"));

    if let Ok(ranges) = result.get("range").expect("range is declared").as_custom_list::<Range>() {
        for range in ranges {
            println!("range: {}..{}", range.low, range.high);
        }
    }

    for kv in result.arguments() {
        println!("{} = {}", kv.key(), kv.value());
    }

    println!("tags: {:?}", result.value::<Vec<Vec<String>>>("tags").unwrap_or_default());
}
