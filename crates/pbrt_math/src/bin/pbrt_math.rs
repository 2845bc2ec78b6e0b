use anyhow::Result;

#[cfg(feature = "cli")]
mod main {
    use super::*;
    use clap::{Parser, Subcommand};

    #[derive(Debug, Parser)]
    #[command(about = "The pbrt math library", long_about = None)]
    struct Cli {
        #[command(subcommand)]
        command: Command,
    }

    #[derive(Debug, Subcommand)]
    enum Command {
        /// Run a benchmarking target
        Benchmark {
            /// Benchmarking target to run
            #[arg(short, long, value_enum)]
            target: pbrt_math::benchmark::Target,

            /// Number of seconds to run the target for (it will always be run at least
            /// once)
            #[arg(short, long, default_value_t = 0.0)]
            duration: f64,

            /// Minimum number of seconds from the program is started until the target
            /// is run
            #[arg(long, default_value_t = 0.0)]
            delay: f64,
        },
        /// Print which lane counts run on hardware registers for each float type
        Registers,
    }

    pub fn main() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            Command::Benchmark {
                target,
                duration,
                delay,
            } => {
                if duration < 0.0 || delay < 0.0 {
                    anyhow::bail!("Duration and delay must be non-negative");
                }
                pbrt_math::benchmark::benchmark(target, duration, delay);
                Ok(())
            }
            Command::Registers => {
                print_registers::<f32>("f32");
                print_registers::<f64>("f64");
                Ok(())
            }
        }
    }

    fn print_registers<T: pbrt_math::Scalar>(name: &str) {
        for &lanes in T::REGISTER_LANES {
            println!(
                "{name} x {lanes}: {}-bit register",
                lanes * std::mem::size_of::<T>() * 8
            );
        }
    }
}

#[cfg(not(feature = "cli"))]
mod main {
    use super::*;

    pub fn main() -> Result<()> {
        anyhow::bail!("This binary requires the `cli` feature to be enabled.")
    }
}

fn main() -> Result<()> {
    main::main()
}
