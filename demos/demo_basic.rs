use optspec::{value, Options};

fn main() {
    let mut options = Options::new("summer");
    options
        .about("Sums its items.")
        .add_options("")
        .option("v,verbose", "Print each item.", value::<bool>().no_value())
        .expect("Invalid option declaration")
        .option(
            "s,start",
            "The value to start from.",
            value::<i64>().default_value("0").env("SUMMER_START"),
        )
        .expect("Invalid option declaration")
        .option("items", "The items to sum.", value::<Vec<i64>>())
        .expect("Invalid option declaration");
    options.parse_positional(["items"]);

    let result = match options.parse() {
        Ok(result) => result,
        Err(error) => {
            eprintln!("Parse error: {error}");
            std::process::exit(1);
        }
    };

    let start: i64 = result.value("start").expect("start has a default");
    let items: Vec<i64> = result.value("items").unwrap_or_default();

    if result.has("verbose") {
        for item in &items {
            println!("Item: {item}");
        }
    }

    let sum: i64 = start + items.iter().sum::<i64>();
    println!("Sum: {sum}");
}
