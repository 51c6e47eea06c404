use serde::{Deserialize, Serialize};

use stowage::io::ext_repr::{ExtInstance, ExtSolution};

use crate::config::DblfConfig;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct DblfOutput {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: DblfConfig,
}
