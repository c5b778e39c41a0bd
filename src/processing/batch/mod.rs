mod pool;
mod processor;

pub use pool::WorkerPool;
pub use processor::BatchProcessor;
