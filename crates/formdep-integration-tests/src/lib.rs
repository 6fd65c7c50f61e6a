//! Empty library target; the tests live under `tests/`.
