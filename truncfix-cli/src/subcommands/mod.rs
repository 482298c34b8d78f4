mod completions;
pub use completions::CompletionsApp;

mod resolve;
pub use resolve::ResolveApp;
