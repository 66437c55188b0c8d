//! kiln's main application entry point and orchestration logic.
//! Handles command-line argument parsing and coordinates option resolution,
//! generation and bootstrap.

use kiln::{
    bootstrap::{Bootstrapper, GoModuleBootstrapper},
    cli::{get_args, Args},
    config::parse_config,
    constants::MODULE_NAME_OPTION,
    error::{default_error_handler, Result},
    generator::Generator,
    loader::{load_template, TemplateSource},
    logger::init_logger,
    parser::load_values_from_file,
    prompt::{confirm, Prompter},
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the template and its option schema
/// 2. Resolves option values from a file or interactively
/// 3. Renders the template tree and prunes unused extension files
/// 4. Initializes git and the Go module
fn run(args: Args) -> Result<()> {
    let engine = MiniJinjaRenderer::new();

    let source = match args.template {
        Some(dir) => TemplateSource::FileSystem(dir),
        None => TemplateSource::Embedded,
    };
    let template = load_template(source)?;
    let schema = parse_config(&template.config()?)?;

    let values = match &args.config {
        Some(file) => load_values_from_file(file, &schema, &engine)?,
        None => {
            let stdin = std::io::stdin();
            let values = Prompter::new(&engine, stdin.lock(), std::io::stdout()).resolve(&schema)?;
            let target_dir = Generator::target_dir(&args.output_dir, &values)?;
            let proceed =
                confirm(args.yes, format!("Generate project in '{}'?", target_dir.display()))?;
            if !proceed {
                println!("Aborted.");
                return Ok(());
            }
            values
        }
    };

    println!("Generating repo folder...");
    let generator = Generator::new(&engine, &*template, &schema);
    let target_dir = generator.generate(&values, &args.output_dir)?;

    if !args.skip_bootstrap {
        println!("Initializing git and Go modules...");
        GoModuleBootstrapper.bootstrap(&target_dir, values.require_str(MODULE_NAME_OPTION)?)?;
    }

    println!("Project generation completed successfully in {}.", target_dir.display());
    Ok(())
}
