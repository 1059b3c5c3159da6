mod args;
mod types;

use std::{path::Path, process::ExitCode, time::Instant};

use ansi_term::Colour;
use args::{EnhanceArgs, InputArgs, OutputArgs};
use clap::Parser;

use packlet::{
  BuildError, Bundler, BundlerOptions, DependencyNode, DependencyTree, ModuleId, OutputAsset,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

fn format_size(bytes: usize) -> String {
  format!("{:.2} kB", bytes as f64 / 1024.0)
}

fn print_output_assets(outputs: Vec<OutputAsset>) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content.len() as f64 / 1024.0);

    if size.len() > right {
      right = size.len();
    }

    if output.filename.len() > left {
      left = output.filename.len()
    }

    assets.push((output.filename, size));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size) in assets {
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint("<DIR>/"),
      color.paint(filename.as_str()),
      "",
      dim.paint("chunk"),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    )
  }
}

fn describe_node(path: &str, node: &DependencyNode, cwd: &Path) -> String {
  let sizes = format!("{} (+{})", format_size(node.size), format_size(node.subtree_size));
  format!(
    "{} {}",
    Colour::Cyan.paint(ModuleId::from_path(path, cwd).to_string()),
    Colour::White.dimmed().paint(sizes)
  )
}

fn print_references(tree: &DependencyTree, cwd: &Path, prefix: &str) {
  let last = tree.len().saturating_sub(1);
  for (idx, (path, node)) in tree.iter().enumerate() {
    let (branch, indent) = if idx == last { ("└─ ", "   ") } else { ("├─ ", "│  ") };
    println!(
      "{}{}",
      Colour::White.dimmed().paint(format!("{prefix}{branch}")),
      describe_node(path, node, cwd)
    );
    print_references(&node.references, cwd, &format!("{prefix}{indent}"));
  }
}

fn print_dependency_tree(tree: &DependencyTree, cwd: &Path) {
  for (path, node) in tree {
    println!("{}", describe_node(path, node, cwd));
    print_references(&node.references, cwd, "");
  }
}

fn print_errors(errors: &BuildError) {
  for error in &**errors {
    eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  packlet_tracing::init();

  let args = Commands::parse();
  let InputArgs { cwd, input, platform } = args.input;
  let input = input.map(|files| files.iter().map(|p| p.to_string_lossy().into()).collect());

  let bundler = Bundler::new(BundlerOptions {
    input,
    cwd,
    platform: platform.map(Into::into),
    dir: args.output.dir,
    file: args.output.file,
  });
  let mut bundler = match bundler.and_then(|mut bundler| {
    bundler.add_default_loaders()?;
    Ok(bundler)
  }) {
    Ok(bundler) => bundler,
    Err(errors) => {
      print_errors(&errors);
      return ExitCode::FAILURE;
    }
  };

  let start = Instant::now();
  match bundler.write().await {
    Ok(output) => {
      if !args.enhance.silent {
        // Print warnings
        for warning in output.warnings {
          println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
        }

        if args.enhance.tree {
          print_dependency_tree(&bundler.dependency_tree(), &bundler.options().cwd);
          println!();
        }

        // Print output assets
        if !output.assets.is_empty() {
          print_output_assets(output.assets);
        }
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed));
      ExitCode::SUCCESS
    }
    Err(errors) => {
      print_errors(&errors);
      ExitCode::FAILURE
    }
  }
}
