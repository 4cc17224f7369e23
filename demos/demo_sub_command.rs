use optspec::{value, Options};

fn main() {
    let mut options = Options::new("tool");
    options
        .stop_on_positional(true)
        .add_options("")
        .option("C,directory", "Run as if started in DIR.", value::<String>())
        .expect("Invalid option declaration")
        .option("q,quiet", "Print less.", value::<bool>().no_value())
        .expect("Invalid option declaration");

    let arguments: Vec<String> = std::env::args().collect();
    let result = options.parse_args(&arguments).expect("Parse error");

    // Everything from `consumed()` onwards belongs to the sub-command.
    let rest = &arguments[result.consumed()..];

    let mut sub_options = Options::new("tool-sub");
    sub_options
        .add_options("")
        .option("n,count", "How many times.", value::<u32>().default_value("1"))
        .expect("Invalid option declaration")
        .option("command", "The sub-command.", value::<String>())
        .expect("Invalid option declaration")
        .option("args", "The sub-command arguments.", value::<Vec<String>>())
        .expect("Invalid option declaration");
    sub_options.parse_positional(["command", "args"]);

    // Index 0 holds a program name, so the sub-command name lands at index 1.
    let mut sub_arguments = vec!["tool".to_string()];
    sub_arguments.extend(rest.iter().cloned());
    let sub_result = sub_options.parse_args(&sub_arguments).expect("Parse error");

    if let Ok(directory) = result.value::<String>("directory") {
        println!("directory: {directory}");
    }
    println!("quiet: {}", result.has("quiet"));
    println!(
        "command: {:?}",
        sub_result.value::<String>("command").ok()
    );
    println!("count: {}", sub_result.value::<u32>("count").expect("count has a default"));
    println!(
        "args: {:?}",
        sub_result.value::<Vec<String>>("args").unwrap_or_default()
    );
}
