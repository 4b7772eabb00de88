use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use answer_client::{AnsweringService, QueryError, QueryResponse};
use chat_core::MessageId;
use chat_render::ChatView;
use chat_session::{ChatSession, PendingRequest, SubmitRejection};

use crate::printer::TranscriptPrinter;

type QueryCall = Pin<Box<dyn Future<Output = Result<QueryResponse, QueryError>> + Send>>;

/// Interactive chat loop.
///
/// Stdin, the outstanding query and the typing animation are multiplexed on
/// one task, so the session is only ever touched from here.
pub async fn run_interactive_chat(
    client: Arc<dyn AnsweringService>,
    mut view: ChatView,
) -> anyhow::Result<()> {
    let mut session = ChatSession::new();
    let mut printer = TranscriptPrinter::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<(PendingRequest, QueryCall)> = None;
    // Settled message waiting for the running reveal to finish.
    let mut held: Option<MessageId> = None;

    println!("{}", "⚖️  LegalMind".cyan().bold());
    println!("{}", "Ask about contracts, liability, or legal terms.".dimmed());
    println!("{}", "Type '/new' for a new chat, 'exit' or 'quit' to leave".dimmed());
    println!();
    printer.prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let input = line.trim();

                if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
                    println!("{}", "👋 Goodbye!".cyan());
                    break;
                }

                if input == "/new" {
                    session.clear();
                    view.teardown();
                    printer.reset();
                    held = None;
                    println!("{}", "✨ New chat".cyan());
                    printer.prompt();
                    continue;
                }

                match session.submit(input) {
                    Ok(pending) => {
                        sync_view(&mut view, &session, &mut printer);
                        // A reveal still running keeps the line; the notice follows it.
                        if !view.is_typing() {
                            printer.print_thinking();
                        }
                        let request = pending.request();
                        let client = Arc::clone(&client);
                        let call: QueryCall = Box::pin(async move { client.query(&request).await });
                        in_flight = Some((pending, call));
                    }
                    Err(SubmitRejection::EmptyQuestion) => printer.prompt(),
                    Err(SubmitRejection::AlreadySubmitting) => {
                        println!("{}", "⏳ Still searching, please wait".yellow());
                    }
                    Err(e) => return Err(e.into()),
                }
            }

            outcome = async {
                match in_flight.as_mut() {
                    Some((_, call)) => call.await,
                    None => std::future::pending().await,
                }
            }, if in_flight.is_some() => {
                if let Some((pending, _)) = in_flight.take() {
                    let placeholder = pending.placeholder();
                    if session.settle(pending, outcome) {
                        sync_view(&mut view, &session, &mut printer);
                        if view.is_typing() && view.typing_message() != Some(placeholder) {
                            held = Some(placeholder);
                        } else if let Some(message) = session.message(placeholder) {
                            printer.print_answer(&view, message);
                        }
                    }
                    if !view.is_typing() {
                        printer.prompt();
                    }
                }
            }

            Some(update) = view.next_update(), if view.is_typing() => {
                printer.print_update(&update, session.message(update.id));
                if !view.is_typing() {
                    if let Some(message) = held.take().and_then(|id| session.message(id)) {
                        printer.print_answer(&view, message);
                    }
                    if session.is_submitting() {
                        printer.print_thinking();
                    } else {
                        printer.prompt();
                    }
                }
            }
        }
    }

    Ok(())
}

/// Reconcile the view with the session, finishing any reveal it cut short.
fn sync_view(view: &mut ChatView, session: &ChatSession, printer: &mut TranscriptPrinter) {
    let previous = view.typing_message();
    let current = view.sync(session.messages());
    if let Some(previous) = previous.filter(|id| current != Some(*id)) {
        printer.finish_interrupted(session.message(previous));
    }
}
