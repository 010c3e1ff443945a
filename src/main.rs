use clap::{Arg, ArgAction, Command};
use std::path::Path;
use transifex_sync::{
    Credentials, DownloadOutcome, HttpTransifexApi, MockTransifexApi, RepositoryClient,
    RepositoryConfig, TransifexApi,
};

fn common_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("project-name")
            .long("project-name")
            .short('p')
            .help("Human-readable project name the project slug derives from")
            .required(true),
    )
    .arg(
        Arg::new("project-prefix")
            .long("project-prefix")
            .help("Prefix for generated project slugs")
            .default_value("inin"),
    )
    .arg(
        Arg::new("resource-prefix")
            .long("resource-prefix")
            .help("Prefix for generated resource slugs")
            .default_value("inin"),
    )
    .arg(
        Arg::new("out-dir")
            .long("out-dir")
            .short('o')
            .help("Directory for download artifacts and import-outcome markers")
            .default_value("."),
    )
    .arg(
        Arg::new("base-url")
            .long("base-url")
            .help("Override the Transifex API base URL"),
    )
    .arg(
        Arg::new("mock")
            .long("mock")
            .short('m')
            .help("Use the mock API instead of Transifex (no credentials needed)")
            .action(ArgAction::SetTrue),
    )
    .arg(
        Arg::new("verbose")
            .long("verbose")
            .short('v')
            .help("Show the resolved project, resource, and output directory")
            .action(ArgAction::SetTrue),
    )
}

fn cli() -> Command {
    Command::new("transifex-sync")
        .version("0.1.0")
        .about("Transifex upload/review-status/download workflow")
        .subcommand_required(true)
        .subcommand(common_args(
            Command::new("upload")
                .about("Upload a source resource file for translation")
                .arg(
                    Arg::new("repository")
                        .help("Repository name the resource belongs to")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("resource-path")
                        .help("Resource path inside the repository")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("file")
                        .help("Local file to upload")
                        .required(true)
                        .index(3),
                ),
        ))
        .subcommand(common_args(
            Command::new("download")
                .about("Download the reviewed translation for one language")
                .arg(
                    Arg::new("repository")
                        .help("Repository name the resource belongs to")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("resource-path")
                        .help("Resource path inside the repository")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::new("language")
                        .help("Target language code (e.g., fr, es, de)")
                        .required(true)
                        .index(3),
                ),
        ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    let (name, sub) = matches.subcommand().expect("subcommand is required");

    let project_name = sub.get_one::<String>("project-name").unwrap();
    let out_dir = sub.get_one::<String>("out-dir").unwrap();
    let config = RepositoryConfig::new(project_name.as_str(), out_dir.as_str())
        .with_slug_prefixes(
            sub.get_one::<String>("project-prefix").unwrap().as_str(),
            sub.get_one::<String>("resource-prefix").unwrap().as_str(),
        );

    let repository = sub.get_one::<String>("repository").unwrap();
    let resource_path = sub.get_one::<String>("resource-path").unwrap();

    if sub.get_flag("mock") {
        let client = RepositoryClient::new(config, MockTransifexApi::new());
        run(name, &client, sub, repository, resource_path).await
    } else {
        let creds = Credentials::from_env().map_err(|e| {
            eprintln!("{}", e);
            eprintln!("Set TRANSIFEX_USERNAME and TRANSIFEX_PASSWORD, or use --mock");
            e
        })?;
        let mut api = HttpTransifexApi::new(creds)?;
        if let Some(base_url) = sub.get_one::<String>("base-url") {
            api = api.with_base_url(base_url);
        }
        let client = RepositoryClient::new(config, api);
        run(name, &client, sub, repository, resource_path).await
    }
}

async fn run<A: TransifexApi>(
    subcommand: &str,
    client: &RepositoryClient<A>,
    sub: &clap::ArgMatches,
    repository: &str,
    resource_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if sub.get_flag("verbose") {
        let config = client.config();
        println!(
            "Project: {} (slug prefix '{}')",
            config.project_name, config.project_slug_prefix
        );
        println!("Resource: {}/{}", repository, resource_path);
        println!("Output directory: {}", config.output_dir.display());
    }

    match subcommand {
        "upload" => {
            let file = sub.get_one::<String>("file").unwrap();
            if client
                .import_resource(repository, resource_path, Path::new(file))
                .await
            {
                Ok(())
            } else {
                Err("import failed".into())
            }
        }
        "download" => {
            let language = sub.get_one::<String>("language").unwrap();
            match client
                .download_translation(repository, resource_path, language)
                .await
            {
                DownloadOutcome::Downloaded { path } => {
                    println!("Downloaded: {}", path.display());
                    Ok(())
                }
                // An expected wait state: report it and exit cleanly so the
                // outer pipeline can retry on its next pass
                DownloadOutcome::ReviewPending { reason } => {
                    println!("{}", reason);
                    Ok(())
                }
                DownloadOutcome::Failed { detail, .. } => Err(detail.into()),
            }
        }
        other => unreachable!("unknown subcommand '{}'", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_upload_with_flags() {
        let matches = cli()
            .try_get_matches_from([
                "transifex-sync",
                "upload",
                "my-repo",
                "i18n/en.json",
                "work/en.json",
                "--project-name",
                "My Project",
                "--mock",
                "--verbose",
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "upload");
        assert!(sub.get_flag("mock"));
        assert!(sub.get_flag("verbose"));
        assert_eq!(sub.get_one::<String>("file").unwrap(), "work/en.json");
        assert_eq!(sub.get_one::<String>("out-dir").unwrap(), ".");
    }

    #[test]
    fn test_cli_parses_download_defaults() {
        let matches = cli()
            .try_get_matches_from([
                "transifex-sync",
                "download",
                "my-repo",
                "i18n/en.json",
                "fr",
                "-p",
                "My Project",
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "download");
        assert!(!sub.get_flag("verbose"));
        assert_eq!(sub.get_one::<String>("language").unwrap(), "fr");
        assert_eq!(sub.get_one::<String>("project-prefix").unwrap(), "inin");
    }

    #[test]
    fn test_cli_requires_project_name() {
        let result = cli().try_get_matches_from([
            "transifex-sync",
            "download",
            "my-repo",
            "i18n/en.json",
            "fr",
        ]);
        assert!(result.is_err());
    }
}
