use {
    std::io::{self, BufRead},
    tracing::{Level, error},
    tracing_subscriber::FmtSubscriber,
    clap::Parser,
    tally_core::CounterOperation,
    tally_client::{CounterApi, CounterApp},
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    endpoint: String,
}

#[tokio::main]
async fn main() {
    FmtSubscriber::builder().with_max_level(Level::INFO).init();
    let args = Args::parse();

    let mut app = CounterApp::new(CounterApi::new(args.endpoint));
    app.load().await;

    println!("counter: {}", app.displayed_value());
    println!("commands: + (increment), - (decrement), q (quit)");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(v) => v,
            Err(err) => {
                error!("failed to read input: {err:?}");
                break;
            },
        };

        match line.trim() {
            "+" => app.press(CounterOperation::Increment).await,
            "-" => app.press(CounterOperation::Decrement).await,
            "q" => break,
            "" => continue,
            other => {
                println!("unknown command: {other}");
                continue;
            },
        }

        println!("counter: {}", app.displayed_value());
    }
}
