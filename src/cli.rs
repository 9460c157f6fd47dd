use clap::{Parser, Subcommand};

/// Development-time links between application and package folders
///
/// devlink records package folders in an application's `.package-manifest`
/// as relative paths so the application can load them while you develop.
/// Folder arguments accept a path or an alias defined with `devlink alias`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Links a package folder to an application folder in development mode
    ///
    /// Usages:
    ///   list:   devlink link <APP>
    ///   create: devlink link <APP> <PACKAGE>
    ///   remove: devlink link <APP> <PACKAGE> --remove
    ///   clean:  devlink link <APP> --clean-all
    #[command(verbatim_doc_comment)]
    Link {
        /// The physical folder (or valid alias) of the main application
        #[arg(value_name = "APP")]
        app: String,

        /// The physical folder (or valid alias) of a package
        #[arg(value_name = "PACKAGE")]
        package: Option<String>,

        /// Remove the package folder link from the application
        #[arg(short, long)]
        remove: bool,

        /// Remove all links from an application manifest file
        #[arg(short, long)]
        clean_all: bool,

        /// Restart the application after the links are updated
        #[arg(long)]
        restart: bool,
    },

    /// Access and modify a .package-manifest file with the 'application' role
    Manifest {
        /// The physical folder (or valid alias) of the application
        #[arg(value_name = "APP")]
        app: String,

        /// Create a new manifest file
        #[arg(long)]
        create: bool,

        /// Overwrite an existing manifest file when creating
        #[arg(short, long, requires = "create")]
        force: bool,

        /// Open the manifest file in an editor
        #[arg(short, long)]
        open: bool,

        /// Assembly that holds the application environment
        #[arg(short, long, value_name = "ASSEMBLY")]
        assembly: Option<String>,

        /// Class name of the application environment
        #[arg(short, long = "environment-class", value_name = "CLASS")]
        environment_class: Option<String>,
    },

    /// Manage folder aliases
    Alias {
        /// Alias name (lists all aliases if not specified)
        #[arg(value_name = "NAME")]
        name: Option<String>,

        /// Folder the alias points to
        #[arg(value_name = "FOLDER", conflicts_with = "remove")]
        folder: Option<String>,

        /// Remove the alias
        #[arg(short, long, requires = "name")]
        remove: bool,
    },
}
