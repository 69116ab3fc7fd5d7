use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use nestbox::{Config, ContainerId, ItemId, Size, TreeEvent, Workspace};

fn main() -> anyhow::Result<()> {
    // Handle --print-default-config before any other initialization
    if std::env::args().any(|a| a == "--print-default-config") {
        print!("{}", Config::print_default());
        return Ok(());
    }

    env_logger::init();
    log::info!("nestbox v0.1.0 starting");

    // Load config from XDG path or use defaults
    let config_path = dirs_config_path();
    let config = match Config::load(&config_path) {
        Ok(cfg) => {
            log::info!("Config loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            log::warn!("Config load error ({}), using defaults", e);
            Config::default()
        }
    };
    log::info!(
        "Dragging mode: {}, color method: {}",
        config.dragging.mode.as_str(),
        config.boxes.color_method.as_str()
    );

    let mut workspace = Workspace::new(config);
    workspace.observe(|event| {
        if let TreeEvent::ItemRelocated { item, from, to } = event {
            println!("  ({item} moved: {from} -> {to})");
        }
    });

    repl(&mut workspace)
}

/// Get the config file path (~/.config/nestbox/config.toml).
fn dirs_config_path() -> PathBuf {
    let mut path = dirs_home().join(".config").join("nestbox");
    std::fs::create_dir_all(&path).ok();
    path.push("config.toml");
    path
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Read commands from stdin and apply them to the workspace.
fn repl(workspace: &mut Workspace) -> anyhow::Result<()> {
    println!("nestbox demo. Type 'help' for commands.");
    print_tree(workspace);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }

        match run_line(workspace, line.trim()) {
            Ok(true) => return Ok(()),
            Ok(false) => print_tree(workspace),
            Err(e) => println!("error: {e}"),
        }
    }
}

/// Execute one REPL line. Returns Ok(true) on quit.
fn run_line(workspace: &mut Workspace, line: &str) -> anyhow::Result<bool> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => {}
        Some("help") => {
            println!("  add <container>            create an item");
            println!("  rm <item>                  delete an item and its subtree");
            println!("  mv <item> <container> [before-item]");
            println!("  drag <item> <w> <h>        begin a drag");
            println!("  hover <container>          hover the active drag");
            println!("  drop <container> [before-item]");
            println!("  cancel                     cancel the active drag");
            println!("  cmd <name> <item>          run a menu command");
            println!("  commands                   list menu commands");
            println!("  quit");
        }
        Some("add") => {
            let parent = container_arg(words.next())?;
            let item = workspace.create_item(parent)?;
            println!("  created {item}");
        }
        Some("rm") => {
            let item = item_arg(words.next())?;
            workspace.remove_item(item)?;
        }
        Some("mv") => {
            let item = item_arg(words.next())?;
            let target = container_arg(words.next())?;
            let before = words.next().map(|w| parse_id(w).map(ItemId)).transpose()?;
            workspace.relocate_item(item, target, before)?;
        }
        Some("drag") => {
            let item = item_arg(words.next())?;
            let w: f32 = words.next().unwrap_or("100").parse().context("bad width")?;
            let h: f32 = words.next().unwrap_or("60").parse().context("bad height")?;
            workspace.begin_drag(item, Size::new(w, h));
        }
        Some("hover") => {
            let container = container_arg(words.next())?;
            workspace.hover(container);
        }
        Some("drop") => {
            let target = container_arg(words.next())?;
            let before = words.next().map(|w| parse_id(w).map(ItemId)).transpose()?;
            if !workspace.drop_dragged(target, before) {
                println!("  drop did not move anything");
            }
        }
        Some("cancel") => workspace.cancel_drag(),
        Some("cmd") => {
            let name = words.next().context("missing command name")?.to_string();
            let item = item_arg(words.next())?;
            workspace.run_command(&name, item);
        }
        Some("commands") => println!("  {}", workspace.commands().join(", ")),
        Some("quit") | Some("q") => return Ok(true),
        Some(other) => bail!("unknown command '{other}', try 'help'"),
    }
    Ok(false)
}

fn parse_id(word: &str) -> anyhow::Result<u32> {
    word.parse().with_context(|| format!("'{word}' is not an id"))
}

fn item_arg(word: Option<&str>) -> anyhow::Result<ItemId> {
    Ok(ItemId(parse_id(word.context("missing item id")?)?))
}

fn container_arg(word: Option<&str>) -> anyhow::Result<ContainerId> {
    Ok(ContainerId(parse_id(word.context("missing container id")?)?))
}

/// Print the tree with one indent level per nesting depth.
fn print_tree(workspace: &Workspace) {
    let root = workspace.root();
    println!("{root}");
    print_container(workspace, root, 1);
}

fn print_container(workspace: &Workspace, container: ContainerId, indent: usize) {
    let tree = workspace.tree();
    let pad = "  ".repeat(indent);
    if tree.placeholder(container).unwrap_or(None).is_some() {
        println!("{pad}[+]");
        return;
    }
    let items = tree.items_in(container).unwrap_or(&[]).to_vec();
    for item in items {
        let color = workspace
            .depth_color(item)
            .unwrap_or_else(|_| "?".to_string());
        println!("{pad}{item} ({color})");
        if let Ok(child) = tree.container_of(item) {
            println!("{pad}  {child}");
            print_container(workspace, child, indent + 2);
        }
    }
}
