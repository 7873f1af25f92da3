use log::info;
use machine_learning::{
    arch::Network,
    dataset::{Dataset, semeion, synthetic},
    initialization::RandParamGen,
    training::Anneal,
};
use rand::{SeedableRng, rngs::StdRng};

use crate::{DatasetSource, ParamSource, Result, Worker, WorkerConfig, WorkerErr};

pub struct WorkerBuilder;

impl WorkerBuilder {
    /// Builds a `Worker` from a `WorkerConfig`.
    ///
    /// The seeded generator draws the random model parameters first and, for
    /// a synthetic dataset, the dataset afterwards.
    ///
    /// # Args
    /// * `config` - The worker configuration.
    ///
    /// # Returns
    /// A fully initialized `Worker` instance.
    ///
    /// # Errors
    /// If the dataset can't be loaded or doesn't match the model dimensions.
    pub fn build(config: &WorkerConfig) -> Result<Worker> {
        let dims = config.dims;
        let mut rng = StdRng::seed_from_u64(config.seed);

        let model = match &config.params {
            ParamSource::Random => {
                let mut param_gen = RandParamGen::centered(rng)?;
                let model = Network::new(dims, &mut param_gen)?;
                rng = param_gen.into_rng();
                model
            }
            ParamSource::Pretrained(pretrained) => Network::new(dims, &mut pretrained.clone())?,
        };

        let dataset = match &config.dataset {
            DatasetSource::Semeion { path } => semeion::load(path, dims.inputs, dims.outputs)?,
            DatasetSource::Synthetic { items } => {
                synthetic::generate(*items, dims.inputs, dims.outputs, &mut rng)
            }
        };

        check_dims(&dataset, &model)?;
        info!(items = dataset.len(), hidden = dims.hidden; "worker built");

        let anneal = Anneal::new(config.rate, config.anneal);
        Ok(Worker::new(model, dataset, anneal, config.unknown_commands))
    }
}

fn check_dims(dataset: &Dataset, model: &Network) -> Result<()> {
    let dims = model.dims();

    if dataset.input_len() != dims.inputs {
        return Err(WorkerErr::DatasetMismatch {
            what: "input",
            got: dataset.input_len(),
            expected: dims.inputs,
        });
    }

    if dataset.target_len() != dims.outputs {
        return Err(WorkerErr::DatasetMismatch {
            what: "target",
            got: dataset.target_len(),
            expected: dims.outputs,
        });
    }

    Ok(())
}
