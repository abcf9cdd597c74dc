use std::sync::Arc;

use meridian_array::array::Array;
use meridian_array::batch::Batch;
use meridian_error::Result;

use crate::functions::scalar::PlannedScalarFunction;

use super::PhysicalScalarExpression;

#[derive(Debug, Clone)]
pub struct PhysicalScalarFunctionExpr {
    pub function: Box<dyn PlannedScalarFunction>,
    pub inputs: Vec<PhysicalScalarExpression>,
}

impl PhysicalScalarFunctionExpr {
    pub fn eval(&self, batch: &Batch) -> Result<Arc<Array>> {
        let inputs = self
            .inputs
            .iter()
            .map(|input| input.eval(batch))
            .collect::<Result<Vec<_>>>()?;
        let refs: Vec<_> = inputs.iter().collect();

        let out = self.function.execute(&refs)?;
        Ok(Arc::new(out))
    }
}
