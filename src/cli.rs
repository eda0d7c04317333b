use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::app::{self, user_message, AppError, Reference, Viewer};
use crate::books;
use crate::config::{self, Config, DEFAULT_CONFIG_PATH};
use crate::i18n::{self, keys, Translator};
use crate::logging;
use crate::ui_cli::{self, Console};

#[derive(Debug, Parser)]
#[command(
    name = "new_testament_viewer",
    about = "Look up Greek New Testament passages and keep your own translations",
    version
)]
pub struct Cli {
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// UI 언어 (auto, ko, en)
    #[arg(long, short = 'L', global = true)]
    pub lang: Option<String>,

    /// 책별 코퍼스 디렉터리 (설정값보다 우선)
    #[arg(long, global = true)]
    pub corpus_root: Option<PathBuf>,

    /// 번역 저장 디렉터리 (설정값보다 우선)
    #[arg(long, global = true)]
    pub translations_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the 27 recognized book codes.
    Books,

    /// Print the Greek text of a verse or verse range.
    Show(ReferenceArgs),

    /// Save a translation for a verse or verse range.
    Save {
        #[command(flatten)]
        reference: ReferenceArgs,

        /// Translation text. Read from stdin when neither --text nor --file is given.
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the translation from this file.
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print a previously saved translation.
    Translation(ReferenceArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct ReferenceArgs {
    /// Book code, e.g. Matt or 1John
    pub book: String,
    /// Chapter number
    pub chapter: String,
    /// Verse number or inclusive range, e.g. 3 or 3-5
    pub verses: String,
}

impl ReferenceArgs {
    fn to_reference(&self) -> Result<Reference, AppError> {
        let book = books::find_book(&self.book)
            .ok_or_else(|| AppError::UnknownBook(self.book.clone()))?;
        Ok(Reference::new(book, &self.chapter, &self.verses))
    }
}

pub fn run_from_env() -> ExitCode {
    run(Cli::parse())
}

/// 설정을 읽고 로깅을 켠 뒤 명령을 실행한다. 실패하면 번역된 메시지를 출력한다.
pub fn run(cli: Cli) -> ExitCode {
    let mut cfg = match config::load_or_default(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            let tr = Translator::new(&i18n::resolve_language(cli.lang.as_deref(), None));
            eprintln!("{} {err}", tr.t(keys::ERROR_PREFIX));
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut cfg, &cli);
    if let Err(err) = logging::init(&cfg.log_level, cfg.log_file.as_deref()) {
        eprintln!("log setup failed: {err}");
    }

    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, None);
    tracing::debug!(language = %lang, config = %cli.config.display(), "starting viewer");

    match dispatch(cli, &mut cfg, &tr) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{} {}", tr.t(keys::ERROR_PREFIX), user_message(&tr, &err));
            ExitCode::FAILURE
        }
    }
}

fn apply_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(root) = &cli.corpus_root {
        cfg.corpus_root = root.clone();
    }
    if let Some(dir) = &cli.translations_dir {
        cfg.translations_dir = dir.clone();
    }
}

fn dispatch(cli: Cli, cfg: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let viewer = Viewer::from_config(cfg);
    match cli.command {
        None => {
            let stdin = io::stdin();
            let mut con = Console::new(stdin.lock(), io::stdout());
            app::run(cfg, &cli.config, tr.clone(), &mut con)
        }
        Some(Commands::Books) => ui_cli::print_books(&mut io::stdout()),
        Some(Commands::Show(args)) => {
            let text = viewer.load_text(&args.to_reference()?)?;
            if text.is_empty() {
                println!("{}", tr.t(keys::RESULT_NO_VERSES));
            } else {
                println!("{text}");
            }
            Ok(())
        }
        Some(Commands::Save {
            reference,
            text,
            file,
        }) => {
            let reference = reference.to_reference()?;
            let content = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(path)?,
                (None, None) => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let path = viewer.save_translation(&reference, &content)?;
            println!("{} {}", tr.t(keys::RESULT_SAVED), path.display());
            Ok(())
        }
        Some(Commands::Translation(args)) => {
            match viewer.saved_translation(&args.to_reference()?)? {
                Some(text) => println!("{text}"),
                None => println!("{}", tr.t(keys::RESULT_NO_SAVED_TRANSLATION)),
            }
            Ok(())
        }
    }
}
