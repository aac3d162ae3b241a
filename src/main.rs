use clap::{Arg, Command};
use std::error::Error;
use std::{env, path};

use hsync::config::{self, Settings};
use hsync::logging;
use hsync::{api, auth, repo, sync};

fn cli() -> Command {
	Command::new("hsync")
		.version("0.1.0")
		.about("HTTP file-storage sync client")
		.subcommand_required(true)
		.subcommand(
			Command::new("init")
				.about("Create the home-directory config file")
				.arg(Arg::new("server_url").required(false)),
		)
		.subcommand(
			Command::new("init-local")
				.about("Create a repository-local config file in the current directory")
				.arg(Arg::new("server_url").required(false)),
		)
		.subcommand(
			Command::new("config")
				.about("Inspect configuration")
				.subcommand_required(true)
				.subcommand(Command::new("list").about("Show all config layers")),
		)
		.subcommand(
			Command::new("register")
				.about("Register a new account")
				.arg(Arg::new("email").required(true))
				.arg(Arg::new("password").required(true)),
		)
		.subcommand(
			Command::new("login")
				.about("Log in and store the token")
				.arg(Arg::new("email").required(true))
				.arg(Arg::new("password").required(true)),
		)
		.subcommand(Command::new("push").about("Upload local changes to the server"))
		.subcommand(Command::new("pull").about("Download remote changes from the server"))
		.subcommand(Command::new("status").about("Show the transfer plan without syncing"))
}

/// Repository context for commands that must run inside one
fn current_repo() -> Result<repo::Repo, Box<dyn Error>> {
	let cwd = env::current_dir()?;
	Ok(repo::find_repo(&cwd)?)
}

fn print_layer(label: &str, path: &path::Path) -> Result<(), Box<dyn Error>> {
	match config::load_layer(path)? {
		Some(cfg) => {
			let token = cfg.token.as_deref().map(config::mask_token).unwrap_or_default();
			println!("{} ({}): server={} token={}", label, path.display(), cfg.server, token);
		}
		None => println!("{} ({}): not present", label, path.display()),
	}
	Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
	logging::init_tracing();
	let matches = cli().get_matches();

	match matches.subcommand() {
		Some(("init", sub)) => {
			let server = sub.get_one::<String>("server_url").map(|s| s.as_str());
			let path = config::init_home_config(server)?;
			println!("config file created: {}", path.display());
		}
		Some(("init-local", sub)) => {
			let server = sub.get_one::<String>("server_url").map(|s| s.as_str());
			let cwd = env::current_dir()?;
			let path = config::init_local_config(&cwd, server)?;
			println!("config file created: {}", path.display());
		}
		Some(("config", sub)) => {
			if sub.subcommand_matches("list").is_some() {
				let repo_root = current_repo().ok().map(|r| r.root);
				let settings = Settings::resolve(repo_root.as_deref())?;
				println!("active server: {}", settings.server);
				if let Some(root) = &repo_root {
					print_layer("repo config", &config::repo_config_path(root))?;
				}
				print_layer("home config", &config::home_config_path()?)?;
			}
		}
		Some(("register", sub)) => {
			let email = sub.get_one::<String>("email").ok_or("register: email required")?;
			let password =
				sub.get_one::<String>("password").ok_or("register: password required")?;
			let settings = Settings::resolve(current_repo().ok().map(|r| r.root).as_deref())?;
			auth::register(&api::client()?, &settings.server, email, password)?;
			println!("registered successfully");
		}
		Some(("login", sub)) => {
			let email = sub.get_one::<String>("email").ok_or("login: email required")?;
			let password = sub.get_one::<String>("password").ok_or("login: password required")?;
			let cwd = env::current_dir()?;
			let repo_dir = repo::find_repo(&cwd).map(|r| r.root).unwrap_or(cwd);
			let settings = Settings::resolve(Some(&repo_dir))?;
			let tokens = auth::login(&api::client()?, &settings.server, email, password)?;
			let path = config::save_token(&repo_dir, &tokens.token, &tokens.refresh_token)?;
			println!("logged in, token saved to {}", path.display());
		}
		Some(("push", _)) => {
			let repo = current_repo()?;
			let settings = Settings::resolve(Some(&repo.root))?;
			let outcome = sync::push(&settings, &repo.name, &repo.root)?;
			println!(
				"push done: {} uploaded, {} failed",
				outcome.transferred, outcome.failed
			);
		}
		Some(("pull", _)) => {
			let repo = current_repo()?;
			let settings = Settings::resolve(Some(&repo.root))?;
			let outcome = sync::pull(&settings, &repo.name, &repo.root)?;
			println!(
				"pull done: {} downloaded, {} failed",
				outcome.transferred, outcome.failed
			);
		}
		Some(("status", _)) => {
			let repo = current_repo()?;
			let settings = Settings::resolve(Some(&repo.root))?;
			let plan = sync::status(&settings, &repo.name, &repo.root)?;
			if plan.is_empty() {
				println!("up to date");
			} else {
				for record in &plan.to_upload {
					println!("to upload:   {}", record.path);
				}
				for record in &plan.to_download {
					println!("to download: {}", record.path);
				}
			}
		}
		_ => unreachable!("subcommand required"),
	}

	Ok(())
}

// vim: ts=4
