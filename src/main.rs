// src/main.rs

// LambdaStep
// An interactive stepper for a small lambda calculus: parse a term,
// list its redexes, pick one, reduce exactly one step.

use clap::Parser as ClapParser;
use std::path::{Path, PathBuf};

use lambda_step::{
    classify, debug_tree, parse, reduce_at, walk, Heap, Redex, TermId, TermVisitor,
};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// A file containing a single term to parse and inspect. If not
    /// provided, launches the interactive stepper.
    file: Option<PathBuf>,
}

fn show_examples() {
    println!("\n--- LambdaStep Examples ---\n");

    let examples = [
        ("Arithmetic precedence", "1 + 2 * 3"),
        ("A beta redex", "(\\x -> x + 1) 41"),
        ("Nested redexes", "(\\f -> f 2 + f 3) (\\x -> x * x)"),
        ("Let bindings", "let two = 2 in two * two"),
        ("Constructors are inert data", "Cons 1 (Cons 2 Nil)"),
        ("Forces an alpha-rename", "let y = 1 in (\\x -> \\y -> x + y) y"),
    ];

    for (description, code) in examples.iter() {
        println!("// {}", description);
        println!("{}\n", code);
    }
    println!("---------------------------\n");
}

// Collects reducible subterms in pre-order; their position in `found` is
// the number the user picks at the prompt.
struct RedexCollector<'h> {
    heap: &'h Heap,
    found: Vec<(TermId, Redex)>,
}

impl RedexCollector<'_> {
    fn record(&mut self, id: TermId) {
        let kind = classify(self.heap, id);
        if kind != Redex::None {
            self.found.push((id, kind));
        }
    }
}

impl TermVisitor for RedexCollector<'_> {
    fn visit_app(&mut self, id: TermId, _func: TermId, _arg: TermId) {
        self.record(id);
    }

    fn visit_arith(
        &mut self,
        id: TermId,
        _op: lambda_step::ArithOp,
        _left: TermId,
        _right: TermId,
    ) {
        self.record(id);
    }

    fn visit_neg(&mut self, id: TermId, _operand: TermId) {
        self.record(id);
    }
}

fn find_redexes(heap: &Heap, root: TermId) -> Vec<(TermId, Redex)> {
    let mut collector = RedexCollector {
        heap,
        found: Vec::new(),
    };
    walk(heap, root, &mut collector);
    collector.found
}

// One interactive session: the live term, its heap, and the snapshots
// taken before each reduction step.
struct Session {
    heap: Heap,
    current: Option<TermId>,
    history: Vec<TermId>,
}

impl Session {
    fn new() -> Self {
        Session {
            heap: Heap::new(),
            current: None,
            history: Vec::new(),
        }
    }

    fn show_term(&self) {
        let root = match self.current {
            Some(root) => root,
            None => return,
        };
        println!("Term: {}", self.heap.display(root));
        let redexes = find_redexes(&self.heap, root);
        if redexes.is_empty() {
            println!("No redexes; the term is in normal form.");
        } else {
            println!("Redexes (enter a number to reduce):");
            for (index, (id, kind)) in redexes.iter().enumerate() {
                println!("  [{}] {}  ({})", index, self.heap.display(*id), kind);
            }
        }
    }

    /// A new input replaces the term tree wholesale. The old session is
    /// kept untouched if the parse fails.
    fn submit(&mut self, input: &str) {
        let mut heap = Heap::new();
        match parse(input, &mut heap) {
            Ok(root) => {
                self.heap = heap;
                self.current = Some(root);
                self.history.clear();
                self.show_term();
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    fn reduce(&mut self, index: usize) {
        let root = match self.current {
            Some(root) => root,
            None => {
                println!("No current term; enter one first.");
                return;
            }
        };
        let redexes = find_redexes(&self.heap, root);
        let target = match redexes.get(index) {
            Some(&(id, _)) => id,
            None => {
                println!("No redex numbered {}.", index);
                return;
            }
        };

        // Snapshot before mutating so the history shows the step's input.
        let snapshot = match self.heap.clone_term(root) {
            Some(snapshot) => snapshot,
            None => {
                println!("Error: the current term is no longer alive.");
                return;
            }
        };
        match reduce_at(&mut self.heap, target) {
            Ok(()) => {
                self.history.push(snapshot);
                self.show_term();
            }
            // The tree is untouched; the unused snapshot is collected.
            Err(e) => println!("Error: {}", e),
        }

        let mut roots = self.history.clone();
        roots.push(root);
        self.heap.collect(&roots);
        println!("({} nodes alive)", self.heap.alive_count());
    }

    fn show_history(&self) {
        if self.history.is_empty() {
            println!("No reduction steps taken yet.");
            return;
        }
        for (step, id) in self.history.iter().enumerate() {
            println!("  step {}: {}", step, self.heap.display(*id));
        }
    }

    fn show_tree(&self) {
        match self.current {
            Some(root) => print!("{}", debug_tree(&self.heap, root)),
            None => println!("No current term; enter one first."),
        }
    }
}

// Simple REPL
fn repl() {
    println!("LambdaStep REPL");
    println!("Enter a term, a redex number, ':redexes', ':tree', ':history', ':examples', or 'quit'");

    let mut session = Session::new();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout()).unwrap();
        let mut input = String::new();
        std::io::stdin().read_line(&mut input).unwrap();
        let input_str = input.trim();

        if input_str == "quit" || input_str == "exit" {
            break;
        }
        if input_str.is_empty() {
            continue;
        }
        match input_str {
            ":examples" => show_examples(),
            ":tree" => session.show_tree(),
            ":history" => session.show_history(),
            ":redexes" => session.show_term(),
            _ => match input_str.parse::<usize>() {
                Ok(index) => session.reduce(index),
                Err(_) => session.submit(input_str),
            },
        }
    }
}

/// One-shot mode: parse the file's term and report what a click would see.
fn run_file(path: &Path) -> Result<(), String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file '{}': {}", path.display(), e))?;

    let mut heap = Heap::new();
    let root = parse(content.trim(), &mut heap).map_err(|e| e.to_string())?;

    println!("Term: {}", heap.display(root));
    println!("Parse tree:\n{}", debug_tree(&heap, root));
    let redexes = find_redexes(&heap, root);
    if redexes.is_empty() {
        println!("No redexes; the term is in normal form.");
    } else {
        for (index, (id, kind)) in redexes.iter().enumerate() {
            println!("  [{}] {}  ({})", index, heap.display(*id), kind);
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = cli.file {
        if let Err(e) = run_file(&path) {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    } else {
        repl();
    }
}
