use crate::Transform;

pub struct TransformDecl {
    pub name: String,
    /// `None` runs the transform without parameters.
    pub constants: Option<Vec<String>>,
    pub transform: Box<dyn Transform + Send + Sync + 'static>,
}

#[derive(Default)]
pub struct Configuration {
    pub transforms: Vec<TransformDecl>,
}

impl Configuration {
    pub fn register_transform<T>(
        mut self,
        name: impl AsRef<str>,
        constants: Option<Vec<String>>,
        transform: T,
    ) -> Self
    where
        T: Transform + Send + Sync + 'static,
    {
        self.push_transform(name, constants, Box::new(transform));

        self
    }

    pub fn push_transform(
        &mut self,
        name: impl AsRef<str>,
        constants: Option<Vec<String>>,
        transform: Box<dyn Transform + Send + Sync + 'static>,
    ) {
        self.transforms.push(TransformDecl {
            name: name.as_ref().to_string(),
            constants,
            transform,
        });
    }
}
