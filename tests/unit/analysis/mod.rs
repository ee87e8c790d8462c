mod landmarks;
