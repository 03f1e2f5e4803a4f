//! Stencil's main application entry point and orchestration logic.
//! Handles command-line argument parsing, context assembly and the
//! tree rendering run.

use log::debug;
use stencil::{
    cli::{get_args, Args},
    config::get_config,
    context::{load_from_stdin, resolve_context},
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::{ensure_output_dir, Processor},
    renderer::TemplateEngine,
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
/// 1. Validates the output directory
/// 2. Loads the template configuration
/// 3. Builds the context: config defaults, then stdin, then `--define`
/// 4. Builds the ignore list: config entries, config files, then `--ignore`
/// 5. Renders the template tree
fn run(args: Args) -> Result<()> {
    let output_root = ensure_output_dir(&args.output_dir, args.force)?;
    let template_root = args.template;
    let config = get_config(&template_root)?;

    let answers = if args.stdin {
        Some(load_from_stdin()?)
    } else {
        None
    };
    let context = resolve_context(config.context(), answers, args.defines);
    debug!("Context: {context:?}");

    let mut ignored = config.ignore_list();
    ignored.extend(&args.ignore);

    let engine = TemplateEngine::with_default_logic();
    let processor = Processor::new(&engine, &template_root, &output_root, &context, &ignored);

    for target in processor.run()? {
        println!("Rendered: '{}'", target.display());
    }

    println!(
        "Template generation completed successfully in {}.",
        output_root.display()
    );
    Ok(())
}
