//! Runs a search on a worker thread and collects its [`PathStatistics`].
use std::{
    io,
    sync::Arc,
    thread::{self, JoinHandle},
};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error};
use thiserror::Error;

use crate::{
    graph::{Graph, NodeIndex},
    search::{Algorithm, CancelToken, SearchError},
    statistics::PathStatistics,
};

#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("failed to spawn search thread")]
    Spawn(#[from] io::Error),
}

/// Notified once per run after the terminal step was recorded
pub trait RunListener: Send + 'static {
    fn on_completed(self, statistics: PathStatistics);
}

impl<F> RunListener for F
where
    F: FnOnce(PathStatistics) + Send + 'static,
{
    fn on_completed(self, statistics: PathStatistics) {
        self(statistics)
    }
}

impl RunListener for Sender<PathStatistics> {
    fn on_completed(self, statistics: PathStatistics) {
        if self.send(statistics).is_err() {
            debug!("Run completed but nobody is listening");
        }
    }
}

/// A search running on its own thread
pub struct RunHandle {
    cancel: CancelToken,
    thread: JoinHandle<Box<dyn Algorithm>>,
}

impl RunHandle {
    /// Asks the search to stop before its next expansion
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the run and hands the algorithm back
    pub fn join(self) -> Box<dyn Algorithm> {
        match self.thread.join() {
            Ok(algorithm) => algorithm,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

pub struct PathRunner;

impl PathRunner {
    /// Runs `algorithm` on a new thread. The endpoints are checked before the
    /// thread is started.
    pub fn spawn<L: RunListener>(
        mut algorithm: Box<dyn Algorithm>,
        graph: Arc<Graph>,
        start: NodeIndex,
        destination: NodeIndex,
        listener: L,
    ) -> Result<RunHandle, RunError> {
        validate(&graph, start, destination)?;

        let cancel = CancelToken::new();
        let token = cancel.clone();
        let mut stats = new_statistics(algorithm.as_ref(), start, destination);

        let thread = thread::Builder::new()
            .name(format!("search-{}", algorithm.kind().help_ref()))
            .spawn(move || {
                stats.init();
                let result =
                    algorithm.find_route_with_cancel(&graph, start, destination, &mut stats, &token);
                stats.finish();
                if let Err(e) = result {
                    error!("Search failed: {}", e);
                }
                listener.on_completed(stats);
                algorithm
            })?;

        Ok(RunHandle { cancel, thread })
    }

    /// Like [`PathRunner::spawn`], the statistics arrive on the returned channel
    pub fn spawn_channel(
        algorithm: Box<dyn Algorithm>,
        graph: Arc<Graph>,
        start: NodeIndex,
        destination: NodeIndex,
    ) -> Result<(RunHandle, Receiver<PathStatistics>), RunError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let handle = Self::spawn(algorithm, graph, start, destination, tx)?;
        Ok((handle, rx))
    }

    /// Runs the search on the calling thread
    pub fn run(
        algorithm: &mut dyn Algorithm,
        graph: &Graph,
        start: NodeIndex,
        destination: NodeIndex,
    ) -> Result<PathStatistics, SearchError> {
        let mut stats = new_statistics(algorithm, start, destination);
        stats.init();
        algorithm.find_route(graph, start, destination, &mut stats)?;
        stats.finish();
        Ok(stats)
    }
}

fn validate(g: &Graph, start: NodeIndex, destination: NodeIndex) -> Result<(), SearchError> {
    if !g.contains_node(start) {
        return Err(SearchError::UnknownStart(start));
    }
    if !g.contains_node(destination) {
        return Err(SearchError::UnknownDestination(destination));
    }
    Ok(())
}

fn new_statistics(
    algorithm: &dyn Algorithm,
    start: NodeIndex,
    destination: NodeIndex,
) -> PathStatistics {
    PathStatistics::new(
        start,
        destination,
        algorithm.name(),
        algorithm.options().snapshot(),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{registry::AlgorithmKind, util::test_graphs::diamond};

    #[test]
    fn spawned_run_reports_statistics() {
        let g = Arc::new(diamond());
        let (a, d) = (g.find_node("A").unwrap(), g.find_node("D").unwrap());

        let (handle, rx) =
            PathRunner::spawn_channel(AlgorithmKind::AStar.create(), g.clone(), a, d).unwrap();
        let stats = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        let alg = handle.join();

        assert_eq!(alg.kind(), AlgorithmKind::AStar);
        assert!(stats.found);
        assert!(stats.duration.is_some());
        assert_eq!(stats.algorithm, "A*");
        assert_eq!(stats.last_path().unwrap().describe(&g), "A -> B -> D");
        // the listener is called exactly once
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closure_listener() {
        let g = Arc::new(diamond());
        let (tx, rx) = crossbeam_channel::unbounded();
        let handle = PathRunner::spawn(
            AlgorithmKind::BritishMuseum.create(),
            g.clone(),
            g.find_node("A").unwrap(),
            g.find_node("C").unwrap(),
            move |stats: PathStatistics| tx.send(stats.found).unwrap(),
        )
        .unwrap();
        handle.join();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![true]);
    }

    #[test]
    fn invalid_endpoints_fail_before_spawning() {
        let g = Arc::new(diamond());
        let result = PathRunner::spawn_channel(
            AlgorithmKind::Dijkstra.create(),
            g,
            0.into(),
            42.into(),
        );
        assert!(matches!(
            result,
            Err(RunError::Search(SearchError::UnknownDestination(_)))
        ));
    }

    #[test]
    fn blocking_run() {
        let g = diamond();
        let mut alg = AlgorithmKind::BreadthFirst.create();
        let stats = PathRunner::run(alg.as_mut(), &g, 0.into(), 3.into()).unwrap();
        assert!(stats.found);
        assert!(stats.is_finished());

        assert_eq!(
            PathRunner::run(alg.as_mut(), &g, 9.into(), 3.into()).unwrap_err(),
            SearchError::UnknownStart(9.into())
        );
    }
}
