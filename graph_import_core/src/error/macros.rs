//! Check macros that record the calling function and source location

/// Name of the enclosing function
#[macro_export]
macro_rules! function_name {
    () => {{
        fn marker() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::error::check::trim_function_path(type_name_of(marker))
    }};
}

/// Return early with a categorized failure
#[macro_export]
macro_rules! bail_status {
    ($code:expr, $($arg:tt)+) => {
        return ::core::result::Result::Err(::core::convert::From::from(
            $crate::error::ImportError::from(
                $crate::error::Status::new($code, format!($($arg)+))
                    .with_function($crate::function_name!())
                    .at(file!(), line!()),
            ),
        ))
    };
}

/// Fail the current translation step unless `cond` holds
#[macro_export]
macro_rules! ensure_status {
    ($cond:expr, $code:expr) => {
        if !($cond) {
            $crate::bail_status!($code, "Assertion failed: {}", stringify!($cond));
        }
    };

    ($cond:expr, $code:expr, $($arg:tt)+) => {
        if !($cond) {
            $crate::bail_status!($code, $($arg)+);
        }
    };
}

/// Fail the current node unless `cond` holds, attributing the failure to it
#[macro_export]
macro_rules! ensure_node {
    ($cond:expr, $node:expr, $index:expr, $code:expr, $($arg:tt)+) => {
        if !($cond) {
            let status = $crate::error::check::node_status(
                $code,
                format!($($arg)+),
                $node,
                $index,
                Some($crate::function_name!()),
            )
            .at(file!(), line!());
            return ::core::result::Result::Err(::core::convert::From::from(
                $crate::error::ImportError::from(status),
            ));
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::error::{ErrorCode, ImportError, ImportResult, NodeDescriptor, Status};
    use assert_matches::assert_matches;

    struct Node;

    impl NodeDescriptor for Node {
        fn name(&self) -> &str {
            "matmul_7"
        }

        fn operator(&self) -> &str {
            "MatMul"
        }
    }

    fn import_matmul(node: &Node, inputs: usize) -> ImportResult<usize> {
        ensure_node!(
            inputs == 2,
            node,
            7,
            ErrorCode::UnsupportedNodeInput,
            "expected 2 inputs, found {}",
            inputs
        );
        Ok(inputs)
    }

    fn create_network(handle: Option<u32>) -> ImportResult<u32> {
        ensure_status!(handle.is_some(), ErrorCode::InternalError);
        Ok(handle.unwrap_or_default())
    }

    fn load_model(bytes: &[u8]) -> ImportResult<()> {
        if bytes.is_empty() {
            bail_status!(ErrorCode::ModelDeserializeFailed, "empty buffer");
        }
        Ok(())
    }

    fn transport_status(error: ImportError) -> Status {
        error.as_transport().map(|e| e.status().clone()).unwrap()
    }

    #[test]
    fn test_function_name() {
        assert_eq!(function_name!(), "test_function_name");
    }

    #[test]
    fn test_ensure_node_captures_context() {
        assert_eq!(import_matmul(&Node, 2).unwrap(), 2);

        let status = transport_status(import_matmul(&Node, 3).unwrap_err());
        assert_eq!(status.code(), ErrorCode::UnsupportedNodeInput);
        assert_eq!(status.node_index(), Some(7));
        assert_eq!(status.node_name(), Some("matmul_7"));
        assert_eq!(status.function_name(), Some("import_matmul"));
        assert_eq!(status.description(), "expected 2 inputs, found 3");
        assert!(status.location().is_some());
        assert_eq!(
            status.to_string(),
            "In node 7 with name: matmul_7 and operator: MatMul (import_matmul): \
             UNSUPPORTED_NODE_INPUT: expected 2 inputs, found 3"
        );
    }

    #[test]
    fn test_ensure_status_default_description() {
        let status = transport_status(create_network(None).unwrap_err());
        assert_eq!(status.code(), ErrorCode::InternalError);
        assert_eq!(status.description(), "Assertion failed: handle.is_some()");
        assert_eq!(status.function_name(), Some("create_network"));
        assert!(!status.has_node_attribution());
        assert_eq!(
            status.to_string(),
            "In node -1 with name:  and operator:  (create_network): \
             INTERNAL_ERROR: Assertion failed: handle.is_some()"
        );
    }

    #[test]
    fn test_bail_status() {
        assert!(load_model(b"graph").is_ok());
        assert_matches!(load_model(b""), Err(ImportError::Status(_)));

        let status = transport_status(load_model(b"").unwrap_err());
        assert_eq!(
            status.to_string(),
            "(load_model): MODEL_DESERIALIZE_FAILED: empty buffer"
        );
    }
}
