use std::sync::Arc;

use meridian_array::array::Array;
use meridian_array::batch::Batch;
use meridian_array::scalar::OwnedScalarValue;
use meridian_error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicalLiteralExpr {
    pub literal: OwnedScalarValue,
}

impl PhysicalLiteralExpr {
    pub fn eval(&self, batch: &Batch) -> Result<Arc<Array>> {
        Ok(Arc::new(self.literal.as_array(batch.num_rows())))
    }
}
