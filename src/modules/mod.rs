pub(crate) mod landmark_client;
