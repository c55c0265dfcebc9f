use clap::Parser;
use train_prep::cli::{self, Cli};
use train_prep::{FolderBatchProcessor, PrepResult};

fn main() {
    train_prep::logging::init();

    // Failures are reported on the console only; the exit status stays 0.
    if let Err(error) = run() {
        tracing::error!(code = error.error_code(), %error, "train_prep aborted");
        println!("Unhandled error while running: {error}");
    }
}

fn run() -> PrepResult<()> {
    let args = Cli::parse();

    let folder = match &args.folder {
        Some(path) => path.to_string_lossy().into_owned(),
        None => cli::prompt_for_folder(&mut std::io::stdin().lock(), &mut std::io::stdout())?,
    };

    let processor = FolderBatchProcessor::new(args.batch_options());
    let json = args.json;
    let outcome = processor.run_with(&folder, |row| {
        if !json {
            println!("{}", cli::render_row(row));
        }
    });
    cli::emit_run(&outcome, args.json, &mut std::io::stdout().lock())
}
