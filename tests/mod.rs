
// This file organizes the integration tests into a cohesive test suite:
// - generation_mock: generation, editing and persistence flows against a mock model
// - smoke_tests: configuration, storage and shift catalog checks
