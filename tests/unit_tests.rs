use surreal_pojo::{ConvertOpts, InputOpts};

#[test]
fn test_convert_opts_creation() {
    let opts = ConvertOpts { max_depth: 32 };

    assert_eq!(opts.max_depth, 32);
    assert_eq!(opts.config().max_depth, 32);
}

#[test]
fn test_input_opts_creation() {
    let opts = InputOpts {
        input: Some("records.jsonl".into()),
        jsonl: true,
    };

    assert_eq!(opts.input.as_deref(), Some(std::path::Path::new("records.jsonl")));
    assert!(opts.jsonl);
}

#[test]
fn test_default_max_depth() {
    use clap::Parser;

    #[derive(Parser)]
    struct Args {
        #[command(flatten)]
        convert: ConvertOpts,
    }

    // The default only applies when the environment does not override it
    std::env::remove_var("SURREAL_POJO_MAX_DEPTH");

    let args = Args::parse_from(["surreal-pojo"]);
    assert_eq!(args.convert.max_depth, pojo_types::DEFAULT_MAX_DEPTH);

    let args = Args::parse_from(["surreal-pojo", "--max-depth", "16"]);
    assert_eq!(args.convert.max_depth, 16);
}
