use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use discograph::{
    dataset::Dataset,
    export,
    figure::FigureOptions,
    graph::{NodeIdentity, NodeKind},
    layout::DEFAULT_ITERATIONS,
    network::{build_network, Network, NetworkOptions},
    raster::{self, RasterOptions},
    selection::{Selection, DEFAULT_ALBUMS, DEFAULT_SPACING},
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Discograph: album/musician network from a discography table
#[derive(Parser, Debug)]
#[command(
    name = "discograph",
    about = "Build the album/musician network of a discography, lay it out and render it",
    version,
    propagate_version = true,
    arg_required_else_help = true
)]
struct Cli {
    /// CSV file with Album and Artist columns
    #[arg(
        long,
        value_name = "CSV",
        env = "DISCOGRAPH_DATA",
        default_value = "ericDolphyDiscog1.csv",
        global = true
    )]
    data: PathBuf,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List albums with their number of distinct artists
    Albums,
    /// Write the network as a Plotly figure description (JSON)
    Figure(FigureArgs),
    /// Render the network as a TGA image
    Viz(VizArgs),
    /// Print node, edge and degree statistics for a selection
    Stats(SelectionArgs),
    /// Write nodes.csv and edges.csv with layout positions
    Export(ExportArgs),
}

#[derive(Args, Debug, Clone)]
struct SelectionArgs {
    /// Album to include (repeatable). Defaults to "LP: Dash One" and "LP: Iron Man"
    #[arg(long = "album", value_name = "ALBUM")]
    albums: Vec<String>,
    /// Include every album in the dataset
    #[arg(long, conflicts_with = "albums")]
    all_albums: bool,
    /// Include no albums (renders an empty network)
    #[arg(long, conflicts_with_all = ["albums", "all_albums"])]
    no_albums: bool,
    /// Layout spacing K between 0.0 and 1.0
    #[arg(short = 'k', long, value_name = "K", default_value_t = DEFAULT_SPACING, value_parser = parse_spacing)]
    spacing: f64,
    /// Seed for the initial node placement
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Number of relaxation iterations
    #[arg(long, value_name = "N", default_value_t = DEFAULT_ITERATIONS)]
    iterations: usize,
    /// Keep albums and artists with the same name as separate nodes
    #[arg(long, default_value_t = false)]
    typed_nodes: bool,
}

impl SelectionArgs {
    fn selection(&self, dataset: &Dataset) -> discograph::Result<Selection> {
        if self.all_albums {
            Selection::all(dataset, self.spacing)
        } else if self.no_albums {
            Selection::new(Vec::<String>::new(), self.spacing)
        } else if self.albums.is_empty() {
            Selection::new(DEFAULT_ALBUMS.iter().copied(), self.spacing)
        } else {
            Selection::new(self.albums.iter().cloned(), self.spacing)
        }
    }

    fn options(&self) -> NetworkOptions {
        NetworkOptions {
            identity: if self.typed_nodes {
                NodeIdentity::Typed
            } else {
                NodeIdentity::Merged
            },
            iterations: self.iterations,
            seed: self.seed,
        }
    }

    fn build(&self, dataset: &Dataset) -> anyhow::Result<Network> {
        let selection = self.selection(dataset)?;
        Ok(build_network(dataset, &selection, &self.options()))
    }
}

#[derive(Args, Debug)]
struct FigureArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    /// Figure title (may contain <br>)
    #[arg(long, value_name = "TEXT")]
    title: Option<String>,
    /// Output JSON file; stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VizArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    /// Path to output TGA file
    #[arg(long, value_name = "FILE", default_value = "network.tga")]
    output_tga: PathBuf,
    /// Image width in pixels
    #[arg(long, default_value_t = 1000)]
    width: u16,
    /// Image height in pixels
    #[arg(long, default_value_t = 850)]
    height: u16,
    /// Print the image to the terminal after writing it
    #[arg(long, default_value_t = false)]
    display: bool,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    selection: SelectionArgs,
    /// Output directory for nodes.csv and edges.csv
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,
}

fn parse_spacing(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    discograph::selection::validate_spacing(value).map_err(|e| e.to_string())
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

fn print_albums(dataset: &Dataset) -> io::Result<()> {
    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut stdout = stdout.lock();
    for album in dataset.albums() {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(stdout, "{:>4}", album.artists)?;
        stdout.reset()?;
        writeln!(stdout, "  {}", album.name)?;
    }
    Ok(())
}

fn print_stats(network: &Network) -> io::Result<()> {
    let graph = &network.graph;
    let stdout = StandardStream::stdout(ColorChoice::Auto);
    let mut stdout = stdout.lock();

    let mut heading = ColorSpec::new();
    heading.set_bold(true);
    stdout.set_color(&heading)?;
    writeln!(stdout, "Network")?;
    stdout.reset()?;
    writeln!(stdout, "  nodes:   {}", graph.node_count())?;
    writeln!(stdout, "  albums:  {}", graph.count_kind(NodeKind::Album))?;
    writeln!(stdout, "  artists: {}", graph.count_kind(NodeKind::Artist))?;
    writeln!(stdout, "  edges:   {}", graph.edge_count())?;

    let mut ranked: Vec<(usize, &str)> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(idx, node)| (graph.degree(idx), node.name.as_str()))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(b.1)));

    stdout.set_color(&heading)?;
    writeln!(stdout, "Most connected")?;
    stdout.reset()?;
    for (degree, name) in ranked.into_iter().take(10) {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{:>4}", degree)?;
        stdout.reset()?;
        writeln!(stdout, "  {}", name)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let dataset = Dataset::load(&cli.data)
        .with_context(|| format!("failed to load discography from {}", cli.data.display()))?;

    match cli.command {
        Command::Albums => {
            print_albums(&dataset)?;
        }
        Command::Figure(args) => {
            let FigureArgs {
                selection,
                title,
                output,
            } = args;
            let network = selection.build(&dataset)?;
            let mut options = FigureOptions::default();
            if let Some(title) = title {
                options.title = title;
            }
            let figure = network.figure(&options);
            match output {
                Some(path) => {
                    let file = File::create(&path)
                        .with_context(|| format!("cannot create {}", path.display()))?;
                    let mut writer = BufWriter::new(file);
                    figure.write_json(&mut writer)?;
                    writer.flush()?;
                    tracing::info!("Wrote figure to {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut out = stdout.lock();
                    figure.write_json(&mut out)?;
                    writeln!(out)?;
                }
            }
        }
        Command::Viz(args) => {
            let VizArgs {
                selection,
                output_tga,
                width,
                height,
                display,
            } = args;
            let network = selection.build(&dataset)?;
            let options = RasterOptions {
                width,
                height,
                ..RasterOptions::default()
            };
            raster::render_tga(&network.graph, &network.layout, &options, &output_tga)?;
            if display {
                raster::display_in_terminal(
                    &output_tga,
                    (width as u32, height as u32),
                    (120, 60),
                )?;
            }
        }
        Command::Stats(selection) => {
            let network = selection.build(&dataset)?;
            print_stats(&network)?;
        }
        Command::Export(args) => {
            let ExportArgs { selection, output } = args;
            let network = selection.build(&dataset)?;
            export::write_network_csv(&network.graph, &network.layout, &output)?;
        }
    }

    Ok(())
}
