use crate::store::DocumentStore;
use crate::tip::TipClient;
use crate::{DocumentId, DuplexCommand, DuplexUpdate};
use pdf_duplex::{SourceDocument, calculate_statistics, partition, pdf_bytes, plan_split};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Async worker task that processes duplex commands and sends updates.
///
/// Commands run strictly one at a time, so at most one split is ever in
/// flight against a given source document.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<DuplexCommand>,
    update_tx: mpsc::UnboundedSender<DuplexUpdate>,
    tip_client: TipClient,
) {
    let mut store = DocumentStore::new();

    while let Some(cmd) = command_rx.recv().await {
        process_command(cmd, &mut store, &tip_client, &update_tx).await;
    }
}

async fn process_command(
    cmd: DuplexCommand,
    store: &mut DocumentStore,
    tip_client: &TipClient,
    update_tx: &mpsc::UnboundedSender<DuplexUpdate>,
) {
    match cmd {
        DuplexCommand::LoadDocument { path } => {
            handle_load(path, store, update_tx).await;
        }
        DuplexCommand::Split { doc_id } => {
            handle_split(doc_id, store, update_tx).await;
        }
        DuplexCommand::FetchTip { page_count } => {
            let text = tip_client.advisory_tip(page_count).await;
            let _ = update_tx.send(DuplexUpdate::TipReady { text });
        }
        DuplexCommand::CloseDocument { doc_id } => {
            if store.remove(doc_id).is_some() {
                let _ = update_tx.send(DuplexUpdate::DocumentClosed { doc_id });
            } else {
                let _ = update_tx.send(DuplexUpdate::Error {
                    message: format!("No loaded document with id {}", doc_id.0),
                });
            }
        }
    }
}

async fn handle_load(
    path: PathBuf,
    store: &mut DocumentStore,
    update_tx: &mpsc::UnboundedSender<DuplexUpdate>,
) {
    match SourceDocument::load(&path).await {
        Ok(doc) => {
            let page_count = doc.page_count();
            let doc_id = store.insert(doc);
            log::debug!("loaded {} ({page_count} pages)", path.display());
            let _ = update_tx.send(DuplexUpdate::DocumentLoaded { doc_id, page_count });
            let _ = update_tx.send(DuplexUpdate::StatsCalculated {
                stats: calculate_statistics(page_count),
            });
        }
        Err(e) => {
            let _ = update_tx.send(DuplexUpdate::Error {
                message: format!("Failed to load PDF: {e}"),
            });
        }
    }
}

async fn handle_split(
    doc_id: DocumentId,
    store: &mut DocumentStore,
    update_tx: &mpsc::UnboundedSender<DuplexUpdate>,
) {
    let Some(source) = store.get(doc_id) else {
        let _ = update_tx.send(DuplexUpdate::Error {
            message: format!("No loaded document with id {}", doc_id.0),
        });
        return;
    };

    let _ = update_tx.send(DuplexUpdate::Progress {
        operation: "Copying pages".to_string(),
        current: 0,
        total: 2,
    });

    let plan = plan_split(source.page_count());
    let pair = match partition(source, &plan).await {
        Ok(pair) => pair,
        Err(e) => {
            let _ = update_tx.send(DuplexUpdate::Error {
                message: format!("Failed to split PDF: {e}"),
            });
            return;
        }
    };

    let _ = update_tx.send(DuplexUpdate::Progress {
        operation: "Serializing documents".to_string(),
        current: 1,
        total: 2,
    });

    let odd = match pdf_bytes(pair.odd).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = update_tx.send(DuplexUpdate::Error {
                message: format!("Failed to serialize odd-pass PDF: {e}"),
            });
            return;
        }
    };
    let even = match pdf_bytes(pair.even).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let _ = update_tx.send(DuplexUpdate::Error {
                message: format!("Failed to serialize even-pass PDF: {e}"),
            });
            return;
        }
    };

    let _ = update_tx.send(DuplexUpdate::PartsReady {
        doc_id,
        plan,
        odd,
        even,
    });
}
